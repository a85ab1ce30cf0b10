use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;

use crate::db::{DbGraph, GraphDatabase, GraphId};
use crate::error::GraphError;
use crate::multigraph::{EdgeAttrs, Multigraph, NodeAttrs, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Data,
    Csv,
}

impl FromStr for InputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(InputFormat::Data),
            "csv" => Ok(InputFormat::Csv),
            other => Err(GraphError::InvalidParameter(format!(
                "unsupported input format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Data => write!(f, "data"),
            InputFormat::Csv => write!(f, "csv"),
        }
    }
}

pub trait GraphReader {
    fn read(&self, path: &Path) -> Result<Multigraph, GraphError>;
    fn read_db(&self, path: &Path) -> Result<GraphDatabase, GraphError>;
}

pub fn reader_for(format: InputFormat) -> Box<dyn GraphReader> {
    match format {
        InputFormat::Data => Box::new(DataReader),
        InputFormat::Csv => Box::new(CsvReader),
    }
}

/// Line-oriented `.data` format:
///
/// ```text
/// t # <graph id>
/// v <node id> <label>...
/// e <src> <dst> <label>...
/// ```
///
/// An edge line with several labels produces one parallel edge per label.
pub struct DataReader;

impl DataReader {
    fn is_graph_header(line: &str) -> bool {
        line.starts_with("t #")
    }

    fn is_node(line: &str) -> bool {
        line.starts_with("v ")
    }

    fn is_edge(line: &str) -> bool {
        line.starts_with("e ")
    }

    fn parse_graph_id(line: &str) -> Result<GraphId, GraphError> {
        let parts = line.split_whitespace().collect_vec();
        if parts.len() >= 3 && parts[0] == "t" && parts[1] == "#" {
            Ok(parts[2].to_string())
        } else {
            Err(GraphError::Parse(format!(
                "invalid graph header line: {:?}",
                line
            )))
        }
    }

    fn parse_node(line: &str) -> Result<(NodeId, Vec<String>), GraphError> {
        let parts = line.split_whitespace().collect_vec();
        if parts.len() < 2 || parts[0] != "v" {
            return Err(GraphError::Parse(format!("invalid node line: {:?}", line)));
        }
        let id = parts[1]
            .parse()
            .map_err(|_| GraphError::Parse(format!("invalid node id in line: {:?}", line)))?;
        Ok((id, Self::labels(&parts[2..])))
    }

    fn parse_edge(line: &str) -> Result<(NodeId, NodeId, Vec<String>), GraphError> {
        let parts = line.split_whitespace().collect_vec();
        if parts.len() < 3 || parts[0] != "e" {
            return Err(GraphError::Parse(format!("invalid edge line: {:?}", line)));
        }
        let src = parts[1]
            .parse()
            .map_err(|_| GraphError::Parse(format!("invalid edge source in line: {:?}", line)))?;
        let dst = parts[2]
            .parse()
            .map_err(|_| GraphError::Parse(format!("invalid edge target in line: {:?}", line)))?;
        Ok((src, dst, Self::labels(&parts[3..])))
    }

    // The saver joins labels with ", "; whitespace splitting leaves the
    // commas glued to the tokens.
    fn labels(tokens: &[&str]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| t.trim_end_matches(',').to_string())
            .filter(|t| !t.is_empty())
            .collect_vec()
    }

    fn apply_line(graph: &mut Multigraph, line: &str) -> Result<(), GraphError> {
        if Self::is_node(line) {
            let (id, labels) = Self::parse_node(line)?;
            graph.add_node(id, NodeAttrs::labeled(labels));
        } else if Self::is_edge(line) {
            let (src, dst, labels) = Self::parse_edge(line)?;
            if labels.is_empty() {
                graph.add_edge(src, dst, None, EdgeAttrs::default())?;
            }
            for label in labels {
                graph.add_edge(src, dst, None, EdgeAttrs::labeled(label))?;
            }
        }
        Ok(())
    }
}

impl GraphReader for DataReader {
    fn read(&self, path: &Path) -> Result<Multigraph, GraphError> {
        let content = fs::read_to_string(path)?;
        let mut graph = Multigraph::new();
        for line in content.lines() {
            Self::apply_line(&mut graph, line)?;
        }
        debug!(
            "read graph with {} nodes and {} edges from {:?}",
            graph.node_count(),
            graph.edge_count(),
            path
        );
        Ok(graph)
    }

    fn read_db(&self, path: &Path) -> Result<GraphDatabase, GraphError> {
        let content = fs::read_to_string(path)?;
        let mut db = GraphDatabase::new();
        let mut current: Option<DbGraph> = None;

        for line in content.lines() {
            if Self::is_graph_header(line) {
                if let Some(finished) = current.take() {
                    db.add_graph(finished);
                }
                current = Some(DbGraph::new(Self::parse_graph_id(line)?, Multigraph::new()));
            } else if Self::is_node(line) || Self::is_edge(line) {
                let member = current.as_mut().ok_or_else(|| {
                    GraphError::Parse(format!("line before any graph header: {:?}", line))
                })?;
                Self::apply_line(&mut member.graph, line)?;
            }
        }
        if let Some(finished) = current.take() {
            db.add_graph(finished);
        }
        Ok(db)
    }
}

/// Folder of single-column CSV exports.
///
/// Node files have a header containing `id:ID` and one node id per row; edge
/// files have a header containing `:START_ID` and `src|dst` rows. The file
/// stem is the label of everything the file contributes. Node files are
/// applied first so edge endpoints pick up their labels regardless of file
/// order.
pub struct CsvReader;

impl CsvReader {
    fn parse_edge_row(row: &str) -> Result<(NodeId, NodeId), GraphError> {
        let (src, dst) = row.split_once('|').ok_or_else(|| {
            GraphError::Parse(format!("edge row {:?} is not in 'src|dst' form", row))
        })?;
        let src = src
            .trim()
            .parse()
            .map_err(|_| GraphError::Parse(format!("invalid source id in row {:?}", row)))?;
        let dst = dst
            .trim()
            .parse()
            .map_err(|_| GraphError::Parse(format!("invalid target id in row {:?}", row)))?;
        Ok((src, dst))
    }
}

enum CsvFile {
    Nodes { label: String, ids: Vec<NodeId> },
    Edges {
        label: String,
        endpoints: Vec<(NodeId, NodeId)>,
    },
}

impl GraphReader for CsvReader {
    fn read(&self, path: &Path) -> Result<Multigraph, GraphError> {
        let mut csv_paths = fs::read_dir(path)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "csv"))
            .collect_vec();
        csv_paths.sort();

        let mut files = Vec::new();
        for file_path in csv_paths {
            let label = file_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content = fs::read_to_string(&file_path)?;
            let mut lines = content.lines();
            let header = lines.next().ok_or_else(|| {
                GraphError::Parse(format!("csv file {:?} is empty", file_path))
            })?;

            let rows = lines.filter(|l| !l.trim().is_empty());
            if header.contains("id:ID") {
                let ids = rows
                    .map(|row| {
                        row.trim().parse().map_err(|_| {
                            GraphError::Parse(format!("invalid node id row {:?}", row))
                        })
                    })
                    .collect::<Result<Vec<NodeId>, _>>()?;
                files.push(CsvFile::Nodes { label, ids });
            } else if header.contains(":START_ID") {
                let endpoints = rows
                    .map(|row| Self::parse_edge_row(row.trim()))
                    .collect::<Result<Vec<_>, _>>()?;
                files.push(CsvFile::Edges { label, endpoints });
            } else {
                debug!("skipping csv file {:?}: unrecognized header", file_path);
            }
        }

        let mut graph = Multigraph::new();
        for file in files.iter() {
            if let CsvFile::Nodes { label, ids } = file {
                for &id in ids {
                    graph.add_node(id, NodeAttrs::labeled([label.clone()]));
                }
            }
        }
        for file in files.iter() {
            if let CsvFile::Edges { label, endpoints } = file {
                for &(src, dst) in endpoints {
                    graph.add_edge(src, dst, None, EdgeAttrs::labeled(label.clone()))?;
                }
            }
        }
        Ok(graph)
    }

    fn read_db(&self, _path: &Path) -> Result<GraphDatabase, GraphError> {
        Err(GraphError::InvalidParameter(
            "the csv reader does not support graph databases".into(),
        ))
    }
}
