use std::fmt::{
    self,
    Display,
};

use crate::skiplist::{
    node::{
        Node,
        NodeId,
    },
    skiplist::SkipList,
};

/// Columns taken up by one level of a node box.
pub const NODE_WIDTH: usize = 9;

impl<K, G> SkipList<K, G>
where
    K: Display,
{
    /// Draws the list top to bottom, one box per node. Each level is a lane
    /// of [`NODE_WIDTH`] columns; a box covers the lanes its node reaches and
    /// arrows continue past it on the higher lanes. A `V` marks where a lane
    /// lands on the next node.
    pub fn to_debug_string(&self) -> String {
        let top = self.max_level;
        let mut out = String::new();

        lanes(&mut out, 1, top, top, '|', '|');
        lanes(&mut out, 1, top, top, '|', '|');

        let mut next = self.arena[NodeId::HEAD].forward(1);
        lanes(&mut out, 1, top, self.reach(next), '|', 'V');

        while let Some(id) = next {
            let node = &self.arena[id];
            draw_node(&mut out, node, top);
            next = node.forward(1);
            lanes(&mut out, 1, top, self.reach(next), '|', 'V');
        }

        out
    }

    /// How many lanes end on `id`; every lane ends past the last node.
    fn reach(&self, id: Option<NodeId>) -> usize {
        match id {
            | Some(id) => self.arena[id].level_count(),
            | None => self.max_level,
        }
    }
}

impl<K: Display, G> Display for SkipList<K, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

/// One row of arrows for lanes `first..=last`, closing with a newline. Lanes
/// up to `reaching` get `end`, the rest `middle`.
fn lanes(out: &mut String, first: usize, last: usize, reaching: usize, middle: char, end: char) {
    for lane in first..=last {
        pad(out, (NODE_WIDTH - 1) / 2);
        out.push(if lane <= reaching { end } else { middle });
        pad(out, NODE_WIDTH / 2);
    }
    out.push('\n');
}

/// `start`, `fill` up to `len` columns, then `end`.
fn edge(out: &mut String, len: usize, start: char, fill: char, end: char) {
    out.push(start);
    for _ in 0..len.saturating_sub(2) {
        out.push(fill);
    }
    out.push(end);
}

fn pad(out: &mut String, len: usize) {
    for _ in 0..len {
        out.push(' ');
    }
}

fn draw_node<K: Display>(out: &mut String, node: &Node<K>, top: usize) {
    let len = node.level_count() * NODE_WIDTH;
    let bypass = node.level_count() + 1;
    let label = node.key().map(ToString::to_string).unwrap_or_default();
    let label_len = label.chars().count();

    edge(out, len, '+', '-', '+');
    lanes(out, bypass, top, 0, '|', '|');
    edge(out, len, '|', ' ', '|');
    lanes(out, bypass, top, 0, '|', '|');

    // center the key, spilling over the box if it doesn't fit
    let left = len.saturating_sub(label_len) / 2;
    out.push('|');
    pad(out, left.saturating_sub(1));
    out.push_str(&label);
    pad(out, len.saturating_sub(left + label_len + 1));
    out.push('|');
    lanes(out, bypass, top, 0, '|', '|');

    edge(out, len, '|', ' ', '|');
    lanes(out, bypass, top, 0, '|', '|');
    edge(out, len, '+', '-', '+');
    lanes(out, bypass, top, 0, '|', '|');

    lanes(out, 1, top, top, '|', '|');
    lanes(out, 1, top, top, '|', '|');
}

#[cfg(test)]
mod tests {
    use crate::skiplist::{
        level_generator::ScriptedLevelGenerator,
        SkipList,
    };

    #[test]
    fn test_empty_list() {
        let list: SkipList<u32> = SkipList::new();
        let lane = "    |    \n";
        let landing = "    V    \n";
        assert_eq!(list.to_debug_string(), format!("{lane}{lane}{landing}"));
    }

    #[test]
    fn test_single_node() {
        let mut list = SkipList::with_generator(4, ScriptedLevelGenerator::new(4, [1])).unwrap();
        list.insert(5).unwrap();

        let expected = [
            "    |    ",
            "    |    ",
            "    V    ",
            "+-------+",
            "|       |",
            "|   5   |",
            "|       |",
            "+-------+",
            "    |    ",
            "    |    ",
            "    V    ",
        ]
        .join("\n")
            + "\n";
        assert_eq!(list.to_debug_string(), expected);
        assert_eq!(list.to_string(), expected);
    }

    #[test]
    fn test_tall_and_short_nodes() {
        let mut list =
            SkipList::with_generator(4, ScriptedLevelGenerator::new(4, [2, 1])).unwrap();
        list.insert(1).unwrap();
        list.insert(2).unwrap();

        let rendered = list.to_debug_string();
        let lines: Vec<&str> = rendered.lines().collect();

        // 3 leading rows, then 7 rows and a landing row per node
        assert_eq!(lines.len(), 3 + 2 * 8);
        assert_eq!(lines[3], "+----------------+");
        // the short node lets the second lane pass beside it
        assert_eq!(lines[11], "+-------+    |    ");
        assert_eq!(lines[13], "|   2   |    |    ");
        // both lanes land past the last node
        assert_eq!(lines[18], "    V        V    ");
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_wide_labels_spill() {
        let mut list = SkipList::with_generator(4, ScriptedLevelGenerator::new(4, [1])).unwrap();
        list.insert("a-rather-long-key".to_string()).unwrap();
        assert!(list.to_debug_string().contains("|a-rather-long-key|"));
    }
}
