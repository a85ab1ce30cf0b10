use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use itertools::Itertools;

use crate::db::GraphDatabase;
use crate::error::GraphError;
use crate::multigraph::Multigraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Data,
}

impl FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(OutputFormat::Data),
            other => Err(GraphError::InvalidParameter(format!(
                "unsupported output format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Data => write!(f, "data"),
        }
    }
}

pub trait GraphSaver {
    fn save(&self, graph: &Multigraph, path: &Path) -> Result<(), GraphError>;

    /// Writes every member prefixed with its `t # <id>` header. With
    /// `append` the file is extended instead of replaced, which supports
    /// streaming one extraction at a time.
    fn save_db(&self, db: &GraphDatabase, path: &Path, append: bool) -> Result<(), GraphError>;

    fn format_extension(&self) -> &'static str;
}

pub fn saver_for(format: OutputFormat) -> Box<dyn GraphSaver> {
    match format {
        OutputFormat::Data => Box::new(DataSaver),
    }
}

/// Resolves the user-given path: directories get a default file name, and the
/// format extension always wins over whatever the user supplied.
pub fn resolve_output_path(given: &Path, extension: &str) -> PathBuf {
    if given.is_dir() {
        given.join(format!("output.{}", extension))
    } else {
        given.with_extension(extension)
    }
}

pub struct DataSaver;

impl DataSaver {
    fn to_data_string(graph: &Multigraph) -> String {
        let mut out = String::new();
        for (id, attrs) in graph.nodes() {
            if attrs.labels.is_empty() {
                out.push_str(&format!("v {}\n", id));
            } else {
                out.push_str(&format!("v {} {}\n", id, attrs.labels.iter().join(", ")));
            }
        }
        for edge in graph.edges() {
            match &edge.attrs.label {
                Some(label) => {
                    out.push_str(&format!("e {} {} {}\n", edge.src, edge.dst, label))
                }
                None => out.push_str(&format!("e {} {}\n", edge.src, edge.dst)),
            }
        }
        out
    }
}

impl GraphSaver for DataSaver {
    fn save(&self, graph: &Multigraph, path: &Path) -> Result<(), GraphError> {
        let path = resolve_output_path(path, self.format_extension());
        std::fs::write(path, Self::to_data_string(graph))?;
        Ok(())
    }

    fn save_db(&self, db: &GraphDatabase, path: &Path, append: bool) -> Result<(), GraphError> {
        let path = resolve_output_path(path, self.format_extension());
        let mut file = OpenOptions::new()
            .create(true)
            .append(append)
            .write(true)
            .truncate(!append)
            .open(path)?;
        for member in db.graphs() {
            write!(file, "t # {}\n", member.graph_id)?;
            file.write_all(Self::to_data_string(&member.graph).as_bytes())?;
        }
        Ok(())
    }

    fn format_extension(&self) -> &'static str {
        "data"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbGraph;
    use crate::multigraph::{EdgeAttrs, NodeAttrs};
    use crate::reader::{DataReader, GraphReader};

    fn sample_graph() -> Multigraph {
        let mut g = Multigraph::new();
        g.add_node(0, NodeAttrs::labeled(["person"]));
        g.add_node(1, NodeAttrs::labeled(["person", "admin"]));
        g.add_edge(0, 1, None, EdgeAttrs::labeled("knows")).unwrap();
        g.add_edge(0, 1, None, EdgeAttrs::labeled("likes")).unwrap();
        g
    }

    #[test]
    fn test_data_string_layout() {
        let s = DataSaver::to_data_string(&sample_graph());
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "v 0 person");
        assert_eq!(lines[1], "v 1 person, admin");
        assert!(lines.contains(&"e 0 1 knows"));
        assert!(lines.contains(&"e 0 1 likes"));
    }

    #[test]
    fn test_save_and_read_back() {
        let path = std::env::temp_dir().join("graph_sampler_saver_roundtrip");
        DataSaver.save(&sample_graph(), &path).unwrap();

        let read_back = DataReader
            .read(&path.with_extension("data"))
            .unwrap();
        assert_eq!(read_back.node_count(), 2);
        assert_eq!(read_back.edge_count_between(0, 1), 2);
        assert_eq!(
            read_back.node_attrs(1).unwrap().labels,
            vec!["person", "admin"]
        );
    }

    #[test]
    fn test_save_db_append_streams_members() {
        let path = std::env::temp_dir().join("graph_sampler_saver_append.data");

        let first = GraphDatabase::from_graphs(vec![DbGraph::new("0", sample_graph())]);
        let second = GraphDatabase::from_graphs(vec![DbGraph::new("1", sample_graph())]);
        DataSaver.save_db(&first, &path, false).unwrap();
        DataSaver.save_db(&second, &path, true).unwrap();

        let db = DataReader.read_db(&path).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.graphs()[1].graph_id, "1");

        // Overwrite mode starts from scratch.
        DataSaver.save_db(&first, &path, false).unwrap();
        assert_eq!(DataReader.read_db(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_output_path_appends_extension() {
        assert_eq!(
            resolve_output_path(Path::new("/tmp/foo.txt"), "data"),
            PathBuf::from("/tmp/foo.data")
        );
        assert_eq!(
            resolve_output_path(Path::new("/tmp/foo"), "data"),
            PathBuf::from("/tmp/foo.data")
        );
    }
}
