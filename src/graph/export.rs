use std::collections::HashSet;
use std::io::{self, Write};

use super::Graph;

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Graph {
    /// One GraphViz name per node. Later nodes whose sanitized id is taken
    /// get their index appended.
    fn graphviz_names(&self) -> Vec<String> {
        let mut used = HashSet::with_capacity(self.nodes_count());
        self.nodes()
            .map(|(id, node)| {
                let mut name = node.sanitized_id().to_owned();
                if used.contains(&name) {
                    name = format!("{name}_{}", id.index());
                    while used.contains(&name) {
                        name.push('_');
                    }
                }
                used.insert(name.clone());
                name
            })
            .collect()
    }

    pub fn write_graphviz<W: Write>(&self, mut out: W) -> io::Result<()> {
        let names = self.graphviz_names();
        writeln!(out, "graph oroview {{")?;

        for (id, node) in self.nodes() {
            writeln!(
                out,
                "    {} [label=\"{}\"];",
                names[id.index()],
                escape(node.label())
            )?;
        }

        for (id, edge) in self.edges() {
            let from = &names[edge.node1().index()];
            let to = &names[edge.node2().index()];
            let label = self.edge_label(id);
            if label.is_empty() {
                writeln!(out, "    {from} -- {to};")?;
            } else {
                writeln!(out, "    {from} -- {to} [label=\"{}\"];", escape(&label))?;
            }
        }

        writeln!(out, "}}")?;
        out.flush()
    }

    pub fn to_graphviz(&self) -> String {
        let mut buffer = Vec::new();
        if self.write_graphviz(&mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
