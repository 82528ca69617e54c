//! Navigating attribute trees by group path.

use crate::attr::Attr;
use crate::value::Value;

/// Append `new_attrs` inside the group addressed by `groups`.
///
/// The first existing group matching each path segment is descended into;
/// missing groups are created and appended at the level where the path
/// stops matching. An empty path appends at the top level.
#[must_use]
pub fn append_attrs_to_group(
    groups: &[String],
    mut attrs: Vec<Attr>,
    new_attrs: Vec<Attr>,
) -> Vec<Attr> {
    let Some((head, rest)) = groups.split_first() else {
        attrs.extend(new_attrs);
        return attrs;
    };

    if let Some(attr) = attrs
        .iter_mut()
        .find(|attr| attr.key == *head && attr.value.is_group())
    {
        if let Value::Group(children) = std::mem::take(&mut attr.value) {
            attr.value = Value::Group(append_attrs_to_group(rest, children, new_attrs));
        }
        return attrs;
    }

    attrs.push(Attr::group(
        head.clone(),
        append_attrs_to_group(rest, Vec::new(), new_attrs),
    ));
    attrs
}

/// Find the first attribute named `key` inside the group addressed by `groups`.
///
/// Every group at a level whose key matches the current segment is searched
/// in order; attributes that match a segment but are not groups are skipped.
#[must_use]
pub fn find_attribute<'a>(attrs: &'a [Attr], groups: &[String], key: &str) -> Option<&'a Attr> {
    let Some((head, rest)) = groups.split_first() else {
        return attrs.iter().find(|attr| attr.key == key);
    };

    attrs
        .iter()
        .filter(|attr| attr.key == *head)
        .filter_map(|attr| attr.value.as_group())
        .find_map(|children| find_attribute(children, rest, key))
}
