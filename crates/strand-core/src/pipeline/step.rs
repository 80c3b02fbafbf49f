use std::future::Future;

use super::PipelineError;

/// One typed async transform in a pipeline.
pub trait Step: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn run(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Output, PipelineError>> + Send;
}

/// Two steps run back to back; itself a [`Step`], which is what lets
/// `Pipeline::step` chain arbitrarily.
pub struct Compose<A, B> {
    first: A,
    second: B,
}

impl<A, B> Step for Compose<A, B>
where
    A: Step,
    B: Step<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, PipelineError> {
        let intermediate = self.first.run(input).await?;
        self.second.run(intermediate).await
    }
}

/// Builder for a linear chain of steps.
pub struct Pipeline<S> {
    steps: S,
}

impl Pipeline<()> {
    #[must_use]
    pub fn start<S: Step>(step: S) -> Pipeline<S> {
        Pipeline { steps: step }
    }
}

impl<S: Step> Pipeline<S> {
    #[must_use]
    pub fn step<T: Step<Input = S::Output>>(self, step: T) -> Pipeline<Compose<S, T>> {
        Pipeline {
            steps: Compose {
                first: self.steps,
                second: step,
            },
        }
    }

    /// Run the whole chain on `input`.
    ///
    /// # Errors
    ///
    /// Returns the first step error; later steps do not run.
    pub async fn run(&self, input: S::Input) -> Result<S::Output, PipelineError> {
        self.steps.run(input).await
    }
}
