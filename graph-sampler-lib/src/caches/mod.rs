use std::path::Path;

use rusqlite::DatabaseName::Main;
use rusqlite::{params, Connection};

use crate::error::GraphError;
use crate::multigraph::Multigraph;

/// Keyed blob cache.
pub trait Cache<P, T> {
    fn read(&self, params: P) -> Result<T, GraphError>;
    fn write(&mut self, params: P, data: &T) -> Result<(), GraphError>;
}

/// Key of one generated-graph cache entry: the full generation recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGraphParams {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub graph_strategy: String,
    pub label_strategy: String,
}

/// SQLite-backed cache of generated graphs, bincode blobs keyed by recipe.
///
/// Saves regenerating identical graphs across runs with the same parameters.
pub struct GraphSqliteCache {
    db: Connection,
}

impl GraphSqliteCache {
    pub fn open(path: &Path) -> Result<Self, GraphError> {
        let db = Connection::open(path)?;
        Ok(GraphSqliteCache { db })
    }
}

impl Cache<GeneratedGraphParams, Multigraph> for GraphSqliteCache {
    fn read(&self, params: GeneratedGraphParams) -> Result<Multigraph, GraphError> {
        let data: Vec<u8> = self.db.query_row(
            "SELECT data FROM generated_graph
             WHERE nodes=?1 AND edges=?2 AND graph_strategy=?3 AND label_strategy=?4",
            params![
                params.num_nodes as i64,
                params.num_edges as i64,
                params.graph_strategy,
                params.label_strategy
            ],
            |row| row.get(0),
        )?;
        let graph = bincode::deserialize(&data)?;
        Ok(graph)
    }

    fn write(&mut self, params: GeneratedGraphParams, graph: &Multigraph) -> Result<(), GraphError> {
        let data = bincode::serialize(graph)?;
        self.db.execute(
            "INSERT INTO generated_graph (nodes, edges, graph_strategy, label_strategy, data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                params.num_nodes as i64,
                params.num_edges as i64,
                params.graph_strategy,
                params.label_strategy,
                data
            ],
        )?;
        Ok(())
    }
}

/// Creates a fresh cache database at `path`.
pub fn create_sqlite_cache(path: &str) -> Result<(), GraphError> {
    let db = Connection::open_in_memory()?;
    db.execute(
        "CREATE TABLE generated_graph (
                nodes           INTEGER NOT NULL,
                edges           INTEGER NOT NULL,
                graph_strategy  TEXT NOT NULL,
                label_strategy  TEXT NOT NULL,
                data            BLOB,
                CONSTRAINT generated_graph_pk
                    PRIMARY KEY (nodes, edges, graph_strategy, label_strategy)
            );",
        [],
    )?;
    db.backup(Main, path, None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::{EdgeAttrs, NodeAttrs};

    fn cache_params() -> GeneratedGraphParams {
        GeneratedGraphParams {
            num_nodes: 4,
            num_edges: 3,
            graph_strategy: "barabasi-albert".into(),
            label_strategy: "none".into(),
        }
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let path = std::env::temp_dir().join("graph_sampler_cache_roundtrip.db");
        let _ = std::fs::remove_file(&path);
        create_sqlite_cache(path.to_str().unwrap()).unwrap();

        let mut graph = Multigraph::new();
        graph.add_node(0, NodeAttrs::labeled(["a"]));
        graph.add_edge(0, 1, None, EdgeAttrs::labeled("x")).unwrap();
        graph.add_edge(0, 1, None, EdgeAttrs::labeled("y")).unwrap();

        let mut cache = GraphSqliteCache::open(&path).unwrap();
        cache.write(cache_params(), &graph).unwrap();

        let restored = cache.read(cache_params()).unwrap();
        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.edge_count_between(0, 1), 2);
        assert_eq!(restored.node_attrs(0).unwrap().labels, vec!["a"]);
    }

    #[test]
    fn test_missing_entry_is_an_error() {
        let path = std::env::temp_dir().join("graph_sampler_cache_miss.db");
        let _ = std::fs::remove_file(&path);
        create_sqlite_cache(path.to_str().unwrap()).unwrap();

        let cache = GraphSqliteCache::open(&path).unwrap();
        assert!(cache.read(cache_params()).is_err());
    }
}
