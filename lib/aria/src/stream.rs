//! Stream operators for decoding sequences of responses.
//!
//! The operators work over any `Stream<Item = Result<Response<Bytes>, Error>>`
//! (the shape a transport adapter naturally produces) and inject the decode
//! logic per element:
//!
//! - [`ResponseStreamExt::filter_error_shapes`] surfaces known error bodies
//!   as the stream's failure and forwards everything else unchanged.
//! - [`ResponseStreamExt::decode_json`] decodes every element as `T` and
//!   fails the stream on the first element that does not decode.
//!
//! Both operators are 1-in/0-or-1-out transforms with no internal buffering.
//! A failure is yielded exactly once; afterwards the operator is fused and
//! the upstream is never polled again. Dropping the returned stream drops the
//! upstream, so cancellation propagates the usual pull-based way.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use futures_core::Stream;
use pin_project::pin_project;

use aria_core::{Error, Response, decode, resolve_error_shape};

/// Extension trait adding decode stages to streams of responses.
pub trait ResponseStreamExt: Stream<Item = Result<Response<Bytes>, Error>> + Sized {
    /// Fail the stream on the first element matching a known error shape.
    ///
    /// Elements that match no error shape are forwarded unchanged; this stage
    /// never transforms payload bytes.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pages = responses.filter_error_shapes();
    /// ```
    fn filter_error_shapes(self) -> FilterErrorShapes<Self> {
        FilterErrorShapes {
            stream: self,
            done: false,
        }
    }

    /// Decode every element as `T`, failing the stream on the first element
    /// that does not decode.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tracks = responses.decode_json::<Track>();
    /// ```
    fn decode_json<T: serde::de::DeserializeOwned>(self) -> DecodeJson<Self, T> {
        DecodeJson {
            stream: self,
            done: false,
            _output: PhantomData,
        }
    }
}

impl<S> ResponseStreamExt for S where S: Stream<Item = Result<Response<Bytes>, Error>> {}

// ============================================================================
// filter_error_shapes
// ============================================================================

/// Stream for [`ResponseStreamExt::filter_error_shapes`].
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct FilterErrorShapes<S> {
    #[pin]
    stream: S,
    done: bool,
}

impl<S> Stream for FilterErrorShapes<S>
where
    S: Stream<Item = Result<Response<Bytes>, Error>>,
{
    type Item = Result<Response<Bytes>, Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let item = match ready!(this.stream.poll_next(cx)) {
            Some(Ok(response)) => match resolve_error_shape(&response) {
                Some(shape) => {
                    *this.done = true;
                    Some(Err(Error::Service(shape)))
                }
                None => Some(Ok(response)),
            },
            Some(Err(error)) => {
                *this.done = true;
                Some(Err(error))
            }
            None => {
                *this.done = true;
                None
            }
        };
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            // A failure truncates the stream, so only the upper bound holds
            (0, self.stream.size_hint().1)
        }
    }
}

// ============================================================================
// decode_json
// ============================================================================

/// Stream for [`ResponseStreamExt::decode_json`].
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct DecodeJson<S, T> {
    #[pin]
    stream: S,
    done: bool,
    _output: PhantomData<fn() -> T>,
}

impl<S, T> Stream for DecodeJson<S, T>
where
    S: Stream<Item = Result<Response<Bytes>, Error>>,
    T: serde::de::DeserializeOwned,
{
    type Item = Result<T, Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let item = match ready!(this.stream.poll_next(cx)) {
            Some(Ok(response)) => match decode::<T>(&response) {
                Ok(value) => Some(Ok(value)),
                Err(error) => {
                    *this.done = true;
                    Some(Err(error))
                }
            },
            Some(Err(error)) => {
                *this.done = true;
                Some(Err(error))
            }
            None => {
                *this.done = true;
                None
            }
        };
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.stream.size_hint().1)
        }
    }
}
