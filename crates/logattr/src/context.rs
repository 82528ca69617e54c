//! Attribute extraction from request-scoped context.

use crate::attr::Attr;

/// Extractor producing attributes from a context value.
pub type AttrFromContext<C> = dyn Fn(&C) -> Vec<Attr> + Send + Sync;

/// Run every extractor against `ctx` and concatenate their output in order.
#[must_use]
pub fn context_extractor<C>(ctx: &C, extractors: &[Box<AttrFromContext<C>>]) -> Vec<Attr> {
    extractors.iter().flat_map(|extract| extract(ctx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    type Ctx = HashMap<&'static str, String>;

    #[test]
    fn test_no_extractors() {
        let extractors: Vec<Box<AttrFromContext<Ctx>>> = Vec::new();
        assert!(context_extractor(&Ctx::new(), &extractors).is_empty());
    }

    #[test]
    fn test_extractors_run_in_order() {
        let mut extractors: Vec<Box<AttrFromContext<Ctx>>> = Vec::new();
        extractors.push(Box::new(|_: &Ctx| vec![Attr::string("key1", "value1")]));
        extractors.push(Box::new(|_: &Ctx| vec![Attr::string("key2", "value2")]));
        assert_eq!(
            context_extractor(&Ctx::new(), &extractors),
            vec![
                Attr::string("key1", "value1"),
                Attr::string("key2", "value2")
            ]
        );
    }

    #[test]
    fn test_extractor_reads_context() {
        let mut extractors: Vec<Box<AttrFromContext<Ctx>>> = Vec::new();
        extractors.push(Box::new(|ctx: &Ctx| {
            ctx.get("user_id")
                .map(|id| vec![Attr::string("user_id", id.clone())])
                .unwrap_or_default()
        }));

        let mut ctx = Ctx::new();
        assert!(context_extractor(&ctx, &extractors).is_empty());

        ctx.insert("user_id", "1234".to_owned());
        assert_eq!(
            context_extractor(&ctx, &extractors),
            vec![Attr::string("user_id", "1234")]
        );
    }
}
