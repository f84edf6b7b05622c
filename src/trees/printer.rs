//! Text rendering of a fitted tree.
//!
//! Internal nodes are written as `node: <feature name> < <threshold>` followed by
//! their left and right subtrees, leaves as `leaf: class <class name>`. Each level
//! is indented by two spaces.
use super::node::TreeNode;
use crate::data::dataset::{Number, WholeNumber};
use crate::error::{Result, TreeError};
use std::collections::HashMap;
use std::io::Write;

const INDENT: &str = "  ";

pub(crate) fn write_node<W, S, XT, YT>(
    out: &mut W,
    node: &TreeNode<XT, YT>,
    depth: usize,
    feature_names: &[S],
    class_names: &HashMap<YT, String>,
) -> Result<()>
where
    W: Write,
    S: AsRef<str>,
    XT: Number,
    YT: WholeNumber,
{
    let indent = INDENT.repeat(depth);
    match node {
        TreeNode::Leaf { class } => match class_names.get(class) {
            Some(name) => writeln!(out, "{}leaf: class {}", indent, name)?,
            None => writeln!(out, "{}leaf: class {}", indent, class)?,
        },
        TreeNode::Internal {
            feature_index,
            threshold,
            left,
            right,
        } => {
            let feature_name = feature_names.get(*feature_index).ok_or_else(|| {
                TreeError::invalid(format!("No name for feature {}.", feature_index))
            })?;
            writeln!(
                out,
                "{}node: {} < {}",
                indent,
                feature_name.as_ref(),
                threshold
            )?;
            write_node(out, left, depth + 1, feature_names, class_names)?;
            write_node(out, right, depth + 1, feature_names, class_names)?;
        }
    }
    Ok(())
}
