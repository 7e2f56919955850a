use async_trait::async_trait;

use crate::error::BackendError;
use crate::request::MultiSearchRequest;
use crate::response::MultiSearchResponse;

/// A multi-collection text search service.
///
/// Implementations must return exactly one [`CollectionResult`] per entry in
/// [`MultiSearchRequest::searches`], in the same order.
///
/// [`CollectionResult`]: crate::CollectionResult
#[async_trait]
pub trait SearchBackend: Send + Sync {
	/// Run every search in `request` and return the per-collection results.
	async fn multi_search(
		&self,
		request: &MultiSearchRequest,
	) -> Result<MultiSearchResponse, BackendError>;
}

#[async_trait]
impl<T> SearchBackend for std::sync::Arc<T>
where
	T: SearchBackend + ?Sized,
{
	async fn multi_search(
		&self,
		request: &MultiSearchRequest,
	) -> Result<MultiSearchResponse, BackendError> {
		(**self).multi_search(request).await
	}
}
