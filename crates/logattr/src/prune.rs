//! Removal of empty attributes.

use crate::attr::Attr;
use crate::value::Value;

/// Drop attributes with an empty key or a nil value, and groups left without
/// children once their own children are pruned.
///
/// Pruning runs bottom-up. A group keeps its wrapper, even under an empty
/// key, as long as at least one child survives. The operation is idempotent.
#[must_use]
pub fn remove_empty_attrs(attrs: Vec<Attr>) -> Vec<Attr> {
    attrs.into_iter().filter_map(prune_attr).collect()
}

fn prune_attr(attr: Attr) -> Option<Attr> {
    let Attr { key, value } = attr;
    match value.resolve() {
        Value::Group(children) => {
            let children = remove_empty_attrs(children);
            (!children.is_empty()).then(|| Attr::group(key, children))
        },
        value if key.is_empty() || value.is_nil() => None,
        value => Some(Attr { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::LogValuer;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Nothing;

    impl LogValuer for Nothing {
        fn log_value(&self) -> Value {
            Value::nil()
        }
    }

    #[test]
    fn test_keeps_non_empty() {
        let attrs = vec![Attr::bool("bool", true), Attr::int("int", 42)];
        assert_eq!(remove_empty_attrs(attrs.clone()), attrs);

        let attrs = vec![Attr::bool("bool", false), Attr::int("int", 0)];
        assert_eq!(remove_empty_attrs(attrs.clone()), attrs);
    }

    #[test]
    fn test_removes_missing_keys() {
        assert_eq!(
            remove_empty_attrs(vec![Attr::bool("", true), Attr::int("int", 42)]),
            vec![Attr::int("int", 42)]
        );
    }

    #[test]
    fn test_removes_missing_values() {
        assert_eq!(
            remove_empty_attrs(vec![Attr::nil("test"), Attr::int("int", 42)]),
            vec![Attr::int("int", 42)]
        );
        assert_eq!(
            remove_empty_attrs(vec![Attr::group("test", vec![]), Attr::int("int", 42)]),
            vec![Attr::int("int", 42)]
        );
        assert_eq!(
            remove_empty_attrs(vec![Attr::valuer("lazy", Nothing)]),
            Vec::<Attr>::new()
        );
    }

    #[test]
    fn test_removes_nested() {
        assert_eq!(
            remove_empty_attrs(vec![
                Attr::group("test", vec![Attr::nil("foobar")]),
                Attr::int("int", 42),
            ]),
            vec![Attr::int("int", 42)]
        );
        assert_eq!(
            remove_empty_attrs(vec![Attr::group(
                "test",
                vec![Attr::int("int", 42), Attr::nil("foobar")]
            )]),
            vec![Attr::group("test", vec![Attr::int("int", 42)])]
        );
        assert_eq!(
            remove_empty_attrs(vec![Attr::group(
                "outer",
                vec![Attr::group("inner", vec![Attr::nil("gone")])]
            )]),
            Vec::<Attr>::new()
        );
    }

    #[test]
    fn test_keeps_unnamed_group_with_children() {
        assert_eq!(
            remove_empty_attrs(vec![Attr::group("", vec![Attr::int("int", 42)])]),
            vec![Attr::group("", vec![Attr::int("int", 42)])]
        );
        assert_eq!(
            remove_empty_attrs(vec![Attr::group("", vec![Attr::nil("x")])]),
            Vec::<Attr>::new()
        );
    }

    fn arb_attr() -> impl Strategy<Value = Attr> {
        let leaf = prop_oneof![
            ("[a-c]{0,2}", any::<i64>()).prop_map(|(k, v)| Attr::int(k, v)),
            "[a-c]{0,2}".prop_map(Attr::nil),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            ("[a-c]{0,2}", proptest::collection::vec(inner, 0..4))
                .prop_map(|(k, children)| Attr::group(k, children))
        })
    }

    proptest! {
        #[test]
        fn prop_remove_empty_is_idempotent(attrs in proptest::collection::vec(arb_attr(), 0..6)) {
            let once = remove_empty_attrs(attrs);
            let twice = remove_empty_attrs(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
