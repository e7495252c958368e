use super::*;
use crate::test_support::{ids, tok};
use crate::ListTokenizer;
use plack_ir::{SourceCode, TokenId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn upstream(raw_ids: &[u32]) -> Box<dyn Tokenizer> {
    let offsets = 0_u32..;
    Box::new(ListTokenizer::from_tokens(
        raw_ids.iter().zip(offsets).map(|(&id, offset)| tok(id, offset)),
    ))
}

#[test]
fn null_filter_passes_everything() {
    let mut filter = NullFilter::pass_through();
    assert!(!filter.is_initialized());
    filter.initialize(upstream(&[20, 21, 22]));
    assert!(filter.is_initialized());
    assert_eq!(ids(&filter.remaining().unwrap()), vec![20, 21, 22]);
}

#[test]
#[should_panic(expected = "used before `initialize`")]
fn uninitialized_filter_panics() {
    let mut filter = NullFilter::pass_through();
    let _ = filter.has_next();
}

#[test]
fn filters_report_upstream_source_code() {
    let source = SourceCode::shared_text("main.plack", "");
    let mut filter = NullFilter::pass_through();
    assert_eq!(filter.source_code(), None);
    filter.initialize(Box::new(Lookahead::new(
        crate::ListSource::new([tok(20, 0)]).with_source_code(source.clone()),
    )));
    assert_eq!(filter.source_code(), Some(source));
}

#[test]
fn removal_filter_drops_matches() {
    let mut filter = RemovalFilter::removing(|t: &Token| t.id().raw() % 2 == 1);
    filter.initialize(upstream(&[20, 21, 22, 23, 25, 24]));
    assert!(filter.has_token_after_next().unwrap());
    assert_eq!(filter.peek_token_after_next().unwrap().id(), TokenId(22));
    assert_eq!(ids(&filter.remaining().unwrap()), vec![20, 22, 24]);
}

#[test]
fn discard_reaches_upstream() {
    let mut filter = NullFilter::pass_through();
    filter.initialize(upstream(&[20, 21]));
    filter.discard_remaining();
    assert!(!filter.has_next().unwrap());
}

/// Emits each token twice, the copy shifted one column right.
struct Doubler;

impl TokenGenerator for Doubler {
    fn generate(
        &mut self,
        upstream: &mut dyn Tokenizer,
        out: &mut VecDeque<Token>,
    ) -> Result<(), Abort> {
        if let Some(token) = upstream.try_next()? {
            let copy = token.relocated(plack_ir::SourceLocation::single(
                token.position_after(),
            ));
            out.push_back(token);
            out.push_back(copy);
        }
        Ok(())
    }
}

/// Merges runs of equal ids into their first token.
struct Squash;

impl TokenGenerator for Squash {
    fn generate(
        &mut self,
        upstream: &mut dyn Tokenizer,
        out: &mut VecDeque<Token>,
    ) -> Result<(), Abort> {
        let Some(first) = upstream.try_next()? else {
            return Ok(());
        };
        while upstream.try_peek()?.is_some_and(|next| next.id() == first.id()) {
            upstream.try_next()?;
        }
        out.push_back(first);
        Ok(())
    }
}

/// Violates the generator contract.
struct Swallow;

impl TokenGenerator for Swallow {
    fn generate(
        &mut self,
        _upstream: &mut dyn Tokenizer,
        _out: &mut VecDeque<Token>,
    ) -> Result<(), Abort> {
        Ok(())
    }
}

#[test]
fn buffered_filter_can_multiply() {
    let mut filter = BufferedFilter::generating(Doubler);
    filter.initialize(upstream(&[20, 21]));
    assert_eq!(ids(&filter.remaining().unwrap()), vec![20, 20, 21, 21]);
}

#[test]
fn buffered_filter_can_merge() {
    let mut filter = BufferedFilter::generating(Squash);
    filter.initialize(upstream(&[20, 20, 21, 22, 22, 22, 20]));
    assert_eq!(ids(&filter.remaining().unwrap()), vec![20, 21, 22, 20]);
}

#[test]
#[should_panic(expected = "token generator produced nothing")]
fn generator_producing_nothing_panics() {
    let mut filter = BufferedFilter::generating(Swallow);
    filter.initialize(upstream(&[20]));
    let _ = filter.has_next();
}

#[test]
fn filters_chain() {
    let mut first = RemovalFilter::removing(|t: &Token| t.is(TokenId(21)));
    first.initialize(upstream(&[20, 21, 22]));
    let mut second = BufferedFilter::generating(Doubler);
    second.initialize(Box::new(first));
    assert_eq!(ids(&second.remaining().unwrap()), vec![20, 20, 22, 22]);
}

proptest! {
    #[test]
    fn removal_never_yields_removed_tokens(
        raw in prop::collection::vec(20_u32..30, 0..30),
        modulus in 2_u32..5,
    ) {
        let remove = move |t: &Token| t.id().raw() % modulus == 0;
        let mut filter = RemovalFilter::removing(remove);
        filter.initialize(upstream(&raw));

        let mut yielded = Vec::new();
        while filter.has_next().unwrap() {
            prop_assert!(!remove(filter.peek().unwrap()));
            if filter.has_token_after_next().unwrap() {
                prop_assert!(!remove(filter.peek_token_after_next().unwrap()));
            }
            yielded.push(filter.next().unwrap().id().raw());
        }

        let expected: Vec<u32> = raw.into_iter().filter(|id| id % modulus != 0).collect();
        prop_assert_eq!(yielded, expected);
    }
}
