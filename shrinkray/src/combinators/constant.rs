use crate::arbitrary::Arbitrary;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// Always produces the same value
#[derive(Debug, Clone)]
pub struct Constant<T> {
    value: T,
}

/// Arbitrary always producing `value`
pub fn constant<T: Clone + PartialEq + 'static>(value: T) -> Constant<T> {
    Constant { value }
}

impl<T: Clone + PartialEq + 'static> Arbitrary<T> for Constant<T> {
    fn generate(&self, _rng: &mut Random, _bias_factor: Option<u32>) -> Value<T> {
        Value::without_context(self.value.clone())
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        *value == self.value
    }

    fn shrink(&self, _value: &T, _context: Option<&Context>) -> Stream<Value<T>> {
        Stream::nil()
    }
}
