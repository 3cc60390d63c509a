//! # Pipeline chain
//!
//! Builds the onion of behaviors around a request handler.
//!
//! Given behaviors `[B1, B2, ..., Bn]` in registration order and the handler
//! `H`, the chain is built by starting from `H` and wrapping it with the
//! behaviors in *reverse* order. Running the result executes `B1` first; if
//! `B1` calls its `next`, control reaches `B2`, and so on until `Bn`'s `next`
//! reaches `H`. `B1` is therefore the outermost layer and `Bn` the innermost.
//!
//! The chain is an explicit linked structure of [`Link`]s rather than a stack
//! of closures, so each layer holds exactly the continuation it was built with.

use crate::{
    behavior::DynPipelineBehavior,
    cancel::CancellationToken,
    error::MediatorError,
    handler::DynRequestHandler,
    message::Request,
};
use futures::future::BoxFuture;
use std::sync::Arc;

/// One layer of a built pipeline.
enum Link<'a, R: Request> {
    /// The terminal handler invocation.
    Handler(&'a dyn DynRequestHandler<R>),
    /// A behavior wrapping the rest of the chain.
    Behavior {
        behavior: &'a dyn DynPipelineBehavior<R>,
        next: Box<Link<'a, R>>,
    },
}

/// The continuation handed to a behavior: "the rest of the pipeline".
///
/// `Next` is `Copy`, so a behavior may run it zero, one or many times.
pub struct Next<'a, R: Request> {
    link: &'a Link<'a, R>,
    request: &'a R,
}

impl<R: Request> Clone for Next<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Request> Copy for Next<'_, R> {}

impl<'a, R: Request> Next<'a, R> {
    /// Runs the remainder of the pipeline with the given cancellation token.
    pub fn run(self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<R::Response, MediatorError>> {
        match self.link {
            Link::Handler(handler) => handler.handle_dyn(self.request, cancel),
            Link::Behavior { behavior, next } => behavior.handle_dyn(
                self.request,
                cancel,
                Next {
                    link: &**next,
                    request: self.request,
                },
            ),
        }
    }

    /// The request flowing through the pipeline.
    pub fn request(&self) -> &'a R {
        self.request
    }
}

/// A composed invocation: every behavior wrapped around the handler.
pub struct Pipeline<'a, R: Request> {
    root: Link<'a, R>,
    depth: usize,
}

impl<'a, R: Request> Pipeline<'a, R> {
    /// Builds the chain for `handler` and `behaviors` (in registration order).
    pub fn build(
        handler: &'a dyn DynRequestHandler<R>,
        behaviors: &'a [Arc<dyn DynPipelineBehavior<R>>],
    ) -> Self {
        let root = behaviors
            .iter()
            .rev()
            .fold(Link::Handler(handler), |next, behavior| Link::Behavior {
                behavior: behavior.as_ref(),
                next: Box::new(next),
            });

        Self {
            root,
            depth: behaviors.len(),
        }
    }

    /// Number of behaviors wrapped around the handler.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The outermost continuation for `request`.
    pub fn entry<'p>(&'p self, request: &'p R) -> Next<'p, R> {
        Next {
            link: &self.root,
            request,
        }
    }

    /// Runs the whole pipeline for `request`.
    pub fn run<'p>(
        &'p self,
        request: &'p R,
        cancel: &'p CancellationToken,
    ) -> BoxFuture<'p, Result<R::Response, MediatorError>> {
        self.entry(request).run(cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{behavior::PipelineBehavior, handler::RequestHandler};
    use std::sync::Mutex;

    struct Echo(u32);

    impl Request for Echo {
        type Response = Vec<String>;
    }

    struct Log(Arc<Mutex<Vec<String>>>);

    impl Log {
        fn push(&self, entry: impl Into<String>) {
            self.0.lock().unwrap().push(entry.into());
        }
    }

    struct Terminal(Arc<Mutex<Vec<String>>>);

    impl RequestHandler<Echo> for Terminal {
        async fn handle(
            &self,
            request: &Echo,
            _cancel: &CancellationToken,
        ) -> Result<Vec<String>, MediatorError> {
            self.0.lock().unwrap().push(format!("H({})", request.0));
            Ok(vec!["handled".to_string()])
        }
    }

    struct Layer {
        name: &'static str,
        log: Log,
    }

    impl PipelineBehavior<Echo> for Layer {
        async fn handle(
            &self,
            _request: &Echo,
            cancel: &CancellationToken,
            next: Next<'_, Echo>,
        ) -> Result<Vec<String>, MediatorError> {
            self.log.push(format!("{}-pre", self.name));
            let mut out = next.run(cancel).await?;
            self.log.push(format!("{}-post", self.name));
            out.push(self.name.to_string());
            Ok(out)
        }
    }

    fn layer(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn DynPipelineBehavior<Echo>> {
        Arc::new(Layer {
            name,
            log: Log(log.clone()),
        })
    }

    #[tokio::test]
    async fn test_empty_pipeline_calls_handler_directly() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = Terminal(log.clone());
        let pipeline = Pipeline::<Echo>::build(&handler, &[]);

        assert_eq!(pipeline.depth(), 0);
        let out = pipeline.run(&Echo(7), &CancellationToken::new()).await.unwrap();
        assert_eq!(out, vec!["handled"]);
        assert_eq!(*log.lock().unwrap(), vec!["H(7)"]);
    }

    #[tokio::test]
    async fn test_first_registered_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = Terminal(log.clone());
        let behaviors = vec![layer("B1", &log), layer("B2", &log), layer("B3", &log)];
        let pipeline = Pipeline::build(&handler, &behaviors);

        assert_eq!(pipeline.depth(), 3);
        let out = pipeline.run(&Echo(1), &CancellationToken::new()).await.unwrap();

        // Results unwind from the innermost layer outward.
        assert_eq!(out, vec!["handled", "B3", "B2", "B1"]);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["B1-pre", "B2-pre", "B3-pre", "H(1)", "B3-post", "B2-post", "B1-post"]
        );
    }

    struct Twice;

    impl PipelineBehavior<Echo> for Twice {
        async fn handle(
            &self,
            _request: &Echo,
            cancel: &CancellationToken,
            next: Next<'_, Echo>,
        ) -> Result<Vec<String>, MediatorError> {
            let mut first = next.run(cancel).await?;
            let second = next.run(cancel).await?;
            first.extend(second);
            Ok(first)
        }
    }

    #[tokio::test]
    async fn test_next_can_run_more_than_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = Terminal(log.clone());
        let behaviors: Vec<Arc<dyn DynPipelineBehavior<Echo>>> = vec![Arc::new(Twice)];
        let pipeline = Pipeline::build(&handler, &behaviors);

        let out = pipeline.run(&Echo(2), &CancellationToken::new()).await.unwrap();
        assert_eq!(out, vec!["handled", "handled"]);
        assert_eq!(*log.lock().unwrap(), vec!["H(2)", "H(2)"]);
    }

    #[tokio::test]
    async fn test_entry_exposes_request() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = Terminal(log);
        let pipeline = Pipeline::<Echo>::build(&handler, &[]);
        let request = Echo(42);
        assert_eq!(pipeline.entry(&request).request().0, 42);
    }
}
