use std::fmt;

/// A pure check over a record. `Err` carries a human-readable reason.
pub trait Validator<R>: Send + Sync {
    /// Stable rule name, used to tag failures
    fn name(&self) -> &str;

    fn validate(&self, record: &R) -> Result<(), String>;
}

/// A pure mapping from one record to the next
pub trait Transformer<R>: Send + Sync {
    fn name(&self) -> &str;

    fn transform(&self, record: R) -> R;
}

/// Adapts a closure into a [`Validator`]
pub struct FnValidator<F> {
    name: String,
    check: F,
}

impl<F> FnValidator<F> {
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<R, F> Validator<R> for FnValidator<F>
where
    F: Fn(&R) -> Result<(), String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        (self.check)(record)
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").field("name", &self.name).finish()
    }
}

/// Adapts a closure into a [`Transformer`]
pub struct FnTransformer<F> {
    name: String,
    map: F,
}

impl<F> FnTransformer<F> {
    pub fn new(name: impl Into<String>, map: F) -> Self {
        Self {
            name: name.into(),
            map,
        }
    }
}

impl<R, F> Transformer<R> for FnTransformer<F>
where
    F: Fn(R) -> R + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, record: R) -> R {
        (self.map)(record)
    }
}

impl<F> fmt::Debug for FnTransformer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransformer").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_validator_delegates_to_closure() {
        let even = FnValidator::new("even", |n: &i64| {
            if n % 2 == 0 {
                Ok(())
            } else {
                Err(format!("{} is odd", n))
            }
        });

        assert_eq!(Validator::<i64>::name(&even), "even");
        assert!(even.validate(&4i64).is_ok());
        assert_eq!(even.validate(&3i64), Err("3 is odd".to_string()));
    }

    #[test]
    fn test_fn_transformer_delegates_to_closure() {
        let double = FnTransformer::new("double", |n: i64| n * 2);
        assert_eq!(double.transform(21i64), 42);
    }
}
