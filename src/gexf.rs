//! GEXF serializer for the interaction graph.
//!
//! Emits GEXF 1.2draft, static mode, undirected. The attribute surface is a
//! compatibility contract with the downstream visualization tooling: every
//! node carries a double attribute named `log_posts`, every edge a `weight`
//! attribute. Element order follows the graph's deterministic iteration
//! order and no timestamps are embedded, so identical inputs produce
//! byte-identical files.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ExportError, MsgnetResult};
use crate::graph::MessageGraph;

const GEXF_XMLNS: &str = "http://www.gexf.net/1.2draft";
const GEXF_SCHEMA: &str = "http://www.gexf.net/1.2draft http://www.gexf.net/1.2draft/gexf.xsd";

/// Write the graph as GEXF to `path`.
pub fn write_gexf(graph: &MessageGraph, path: &Path) -> MsgnetResult<()> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    render_gexf(graph, &mut writer).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "wrote GEXF graph"
    );
    Ok(())
}

/// Render the GEXF document to any writer.
pub fn render_gexf<W: Write>(graph: &MessageGraph, out: &mut W) -> std::io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(
        out,
        r#"<gexf xmlns="{GEXF_XMLNS}" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="{GEXF_SCHEMA}" version="1.2">"#
    )?;
    writeln!(out, "  <meta>")?;
    writeln!(
        out,
        "    <creator>{}</creator>",
        escape_xml(concat!("msgnet ", env!("CARGO_PKG_VERSION")))
    )?;
    writeln!(
        out,
        "    <description>forum private-message interaction network</description>"
    )?;
    writeln!(out, "  </meta>")?;
    writeln!(
        out,
        r#"  <graph defaultedgetype="undirected" mode="static">"#
    )?;

    // node attribute declaration: `log_posts` as a double, id 0
    writeln!(out, r#"    <attributes class="node" mode="static">"#)?;
    writeln!(
        out,
        r#"      <attribute id="0" title="log_posts" type="double" />"#
    )?;
    writeln!(out, "    </attributes>")?;

    writeln!(out, "    <nodes>")?;
    for node in graph.nodes() {
        let id = node.user.to_string();
        writeln!(
            out,
            r#"      <node id="{id}" label="{id}">"#,
            id = escape_xml(&id)
        )?;
        writeln!(out, "        <attvalues>")?;
        writeln!(
            out,
            r#"          <attvalue for="0" value="{}" />"#,
            node.log_posts
        )?;
        writeln!(out, "        </attvalues>")?;
        writeln!(out, "      </node>")?;
    }
    writeln!(out, "    </nodes>")?;

    writeln!(out, "    <edges>")?;
    for (index, (source, target, edge)) in graph.edges().enumerate() {
        writeln!(
            out,
            r#"      <edge id="{index}" source="{}" target="{}" weight="{}" />"#,
            escape_xml(&source.user.to_string()),
            escape_xml(&target.user.to_string()),
            edge.weight
        )?;
    }
    writeln!(out, "    </edges>")?;

    writeln!(out, "  </graph>")?;
    writeln!(out, "</gexf>")?;
    Ok(())
}

/// Escape the five XML-reserved characters in text or attribute content.
fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{EdgeWeights, PairKey};
    use crate::source::UserId;
    use std::collections::BTreeMap;

    fn uid(raw: u64) -> UserId {
        UserId::new(raw).unwrap()
    }

    fn render(graph: &MessageGraph) -> String {
        let mut buf = Vec::new();
        render_gexf(graph, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn fixture() -> MessageGraph {
        let mut edges = EdgeWeights::new();
        edges.insert(PairKey::new(uid(10), uid(20)).unwrap(), 9);
        let mut scores = BTreeMap::new();
        scores.insert(uid(10), 1.0);
        scores.insert(uid(20), 0.0);
        MessageGraph::build(&edges, &scores)
    }

    #[test]
    fn document_declares_undirected_static_graph() {
        let doc = render(&fixture());
        assert!(doc.contains(r#"<graph defaultedgetype="undirected" mode="static">"#));
        assert!(doc.contains(r#"version="1.2""#));
    }

    #[test]
    fn nodes_carry_log_posts_double_attribute() {
        let doc = render(&fixture());
        assert!(doc.contains(r#"<attribute id="0" title="log_posts" type="double" />"#));
        assert!(doc.contains(r#"<node id="10" label="10">"#));
        assert!(doc.contains(r#"<attvalue for="0" value="1" />"#));
        assert!(doc.contains(r#"<attvalue for="0" value="0" />"#));
    }

    #[test]
    fn edges_carry_weight_attribute() {
        let doc = render(&fixture());
        // log10(1 + 9) = 1
        assert!(doc.contains(r#"<edge id="0" source="10" target="20" weight="1" />"#));
    }

    #[test]
    fn rendering_is_deterministic() {
        let graph = fixture();
        assert_eq!(render(&graph), render(&graph));
    }

    #[test]
    fn escape_covers_reserved_characters() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }
}
