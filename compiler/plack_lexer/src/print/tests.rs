use super::*;
use crate::test_support::{ids, tok};
use crate::{FilterTokenizer, ListTokenizer, Tokenizer};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Shared(Rc<RefCell<Vec<u8>>>);

impl Shared {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn prints_each_token_once_and_passes_it_on() {
    let sink = Shared::default();
    let mut filter = PrintFilter::printing_to(sink.clone());
    filter.initialize(Box::new(ListTokenizer::from_tokens([tok(20, 0), tok(21, 1)])));

    // Lookahead pulls both tokens before anything is consumed.
    assert!(filter.has_token_after_next().unwrap());
    assert_eq!(sink.text().lines().count(), 2);

    assert_eq!(ids(&filter.remaining().unwrap()), vec![20, 21]);
    assert_eq!(sink.text(), format!("{:?}\n{:?}\n", tok(20, 0), tok(21, 1)));
}

#[test]
fn failing_sink_falls_back_without_aborting() {
    let fallback = Shared::default();
    let mut filter = PrintFilter::printing_with_fallback(Broken, fallback.clone());
    filter.initialize(Box::new(ListTokenizer::from_tokens([tok(20, 0), tok(21, 1)])));

    assert_eq!(ids(&filter.remaining().unwrap()), vec![20, 21]);
    assert!(filter.sink_failed());
    assert_eq!(fallback.text().lines().count(), 2);
}
