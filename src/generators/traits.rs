use std::marker::PhantomData;

/// A strategy producing candidate values. Uniqueness is not its concern;
/// see [`CodeGenerator`](crate::generators::CodeGenerator).
#[cfg_attr(test, mockall::automock(type Args = usize; type Value = String;))]
pub trait ValueGenerator: Send + Sync {
    type Args;
    type Value;

    fn generate(&self, args: &Self::Args) -> Self::Value;
}

/// Adapts a plain function or closure into a [`ValueGenerator`].
pub struct FnGenerator<A, V, F> {
    f: F,
    _marker: PhantomData<fn(&A) -> V>,
}

pub fn from_fn<A, V, F>(f: F) -> FnGenerator<A, V, F>
where
    F: Fn(&A) -> V + Send + Sync,
{
    FnGenerator {
        f,
        _marker: PhantomData,
    }
}

impl<A, V, F> ValueGenerator for FnGenerator<A, V, F>
where
    F: Fn(&A) -> V + Send + Sync,
{
    type Args = A;
    type Value = V;

    fn generate(&self, args: &A) -> V {
        (self.f)(args)
    }
}
