use crate::tree::tree_node::Node;
use crate::Tree;

#[derive(Debug, Clone)]
pub struct Edge {
    from: usize,
    to: usize,
    transition: u8, // 0 or 1
}

#[derive(Debug, Clone)]
struct DotNode {
    symbol: Option<u8>,
    weight: u64,
}

/// Flattened copy of a [`Tree`], nodes are identified by their preorder position.
#[derive(Debug, Default)]
pub struct DotGraph {
    nodes: Vec<DotNode>,
    edges: Vec<Edge>,
}

impl DotGraph {
    pub fn from_tree(tree: &Tree) -> Self {
        let mut graph = DotGraph::default();
        if let Some(root) = tree.get_root_node() {
            graph.add_node(root);
        }
        graph
    }

    fn add_node(&mut self, node: &Node) -> usize {
        let pos = self.nodes.len();
        self.nodes.push(DotNode {
            symbol: node.symbol(),
            weight: node.weight(),
        });
        if let Some((left, right)) = node.children() {
            let left_pos = self.add_node(left);
            self.edges.push(Edge {
                from: pos,
                to: left_pos,
                transition: 0,
            });
            let right_pos = self.add_node(right);
            self.edges.push(Edge {
                from: pos,
                to: right_pos,
                transition: 1,
            });
        }
        pos
    }
}

/// Renders the tree in the graphviz dot format
pub fn render_plan_to<W: core::fmt::Write>(
    tree: &Tree,
    output: &mut W,
) -> std::result::Result<(), core::fmt::Error> {
    let graph = DotGraph::from_tree(tree);
    let mut rendered = vec![];
    dot::render(&graph, &mut rendered).map_err(|_| core::fmt::Error)?;
    output.write_str(&String::from_utf8_lossy(&rendered))
}

impl<'a> dot::Labeller<'a, usize, Edge> for DotGraph {
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new("huffman").expect("static graph id is a valid identifier")
    }

    fn node_id(&'a self, n: &usize) -> dot::Id<'a> {
        dot::Id::new(format!("N{}", n)).expect("N followed by digits is a valid identifier")
    }

    fn node_label(&'a self, n: &usize) -> dot::LabelText<'a> {
        let node = &self.nodes[*n];
        let out = if let Some(symbol) = node.symbol {
            format!("Cnt:{:?} Symbl:{:?}", node.weight, symbol)
        } else {
            format!("Cnt:{:?}", node.weight)
        };
        dot::LabelText::LabelStr(out.into())
    }

    fn edge_label(&'a self, ed: &Edge) -> dot::LabelText<'a> {
        dot::LabelText::LabelStr(ed.transition.to_string().into())
    }
}

impl<'a> dot::GraphWalk<'a, usize, Edge> for DotGraph {
    fn nodes(&'a self) -> dot::Nodes<'a, usize> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&'a self) -> dot::Edges<'a, Edge> {
        self.edges.iter().cloned().collect()
    }

    fn source(&'a self, e: &Edge) -> usize {
        e.from
    }

    fn target(&'a self, e: &Edge) -> usize {
        e.to
    }
}
