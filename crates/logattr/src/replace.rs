//! Depth-first replace/redact traversal.

use crate::attr::Attr;
use crate::value::Value;

/// Callback invoked for every leaf attribute with the path of enclosing groups.
///
/// Returning [`Attr::nil`] marks the attribute as removed.
pub type ReplaceAttrFn<'a> = dyn Fn(&[String], Attr) -> Attr + Send + Sync + 'a;

/// Apply `replace` to every leaf of the attribute tree.
///
/// Values are resolved before inspection, so self-describing values reach the
/// callback (or become groups) in their expanded form. Groups are never
/// handed to the callback; their key is pushed onto the path and their
/// children are visited in order. With no callback the leaves are returned
/// unchanged.
#[must_use]
pub fn replace_attrs(
    replace: Option<&ReplaceAttrFn<'_>>,
    groups: &[String],
    attrs: Vec<Attr>,
) -> Vec<Attr> {
    attrs
        .into_iter()
        .map(|attr| replace_attr(replace, groups, attr))
        .collect()
}

fn replace_attr(replace: Option<&ReplaceAttrFn<'_>>, groups: &[String], attr: Attr) -> Attr {
    let Attr { key, value } = attr;
    match value.resolve() {
        Value::Group(children) => {
            let mut path = groups.to_vec();
            path.push(key.clone());
            Attr::group(key, replace_attrs(replace, &path, children))
        },
        value => {
            let attr = Attr { key, value };
            match replace {
                Some(replace) => replace(groups, attr),
                None => attr,
            }
        },
    }
}
