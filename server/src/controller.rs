//! Request plumbing shared by the routes: a transformer turns the request
//! into a DTO, a service call runs on it and a presenter turns its output
//! into a response.

use std::future::Future;

use kernel::KernelError;

use crate::error::ErrorStatus;

pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub trait Exhaust<O>: 'static + Sync + Send {
    type To;
    fn emit(&self, output: O) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<<T as Intake<I>>::To, P>
    where
        T: Intake<I>,
    {
        Transformed {
            dto: self.transformer.emit(input),
            presenter: self.presenter,
        }
    }
}

pub struct Transformed<D, P> {
    dto: D,
    presenter: P,
}

impl<D, P> Transformed<D, P> {
    pub async fn handle<F, Fut, O>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = error_stack::Result<O, KernelError>>,
    {
        let output = f(self.dto).await.map_err(ErrorStatus::from)?;
        Ok(self.presenter.emit(output))
    }
}
