//! Typed CRUD over resource collections.

use std::marker::PhantomData;

use serde_json::Value;
use tracing::debug;

use campus_core::error::{Error, InvalidInputError};
use campus_core::resources::ListQuery;
use campus_core::{ApiPath, ApiRequest, Method, NormalizedError, RequestOptions, Resource};

use crate::pipeline::{ApiClient, ApiResult};

/// CRUD calls for one [`Resource`] type, e.g. `client.resource::<Room>()`.
///
/// `create` and `update` validate the model first; an invalid model is
/// returned as a validation error without contacting the server.
#[derive(Debug)]
pub struct ResourceClient<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> ResourceClient<'a, R> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<Vec<R>> {
        let request = ApiRequest::new(Method::Get, R::COLLECTION)?.with_query(query)?;
        self.client.send(request, RequestOptions::default()).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<R> {
        let request = ApiRequest::new(Method::Get, item_path::<R>(id)?)?;
        self.client.send(request, RequestOptions::default()).await
    }

    pub async fn create(&self, item: &R) -> ApiResult<R> {
        validate(item)?;
        let request = ApiRequest::new(Method::Post, R::COLLECTION)?.with_body(item)?;
        self.client.send(request, RequestOptions::default()).await
    }

    pub async fn update(&self, id: &str, item: &R) -> ApiResult<R> {
        validate(item)?;
        let request = ApiRequest::new(Method::Put, item_path::<R>(id)?)?.with_body(item)?;
        self.client.send(request, RequestOptions::default()).await
    }

    /// Partial update. The server validates the fields.
    pub async fn patch(&self, id: &str, fields: &Value) -> ApiResult<R> {
        let request = ApiRequest::new(Method::Patch, item_path::<R>(id)?)?.with_body(fields)?;
        self.client.send(request, RequestOptions::default()).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let request = ApiRequest::new(Method::Delete, item_path::<R>(id)?)?;
        let _: Value = self.client.send(request, RequestOptions::default()).await?;
        Ok(())
    }
}

fn validate<R: Resource>(item: &R) -> Result<(), NormalizedError> {
    item.validate().map_err(|errors| {
        debug!(collection = R::COLLECTION, %errors, "model failed validation");
        NormalizedError::from(Error::Validation(errors))
    })
}

/// `collection/id`, rejecting ids that would address another path.
fn item_path<R: Resource>(id: &str) -> Result<ApiPath, Error> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        return Err(InvalidInputError::Path {
            value: id.to_string(),
            reason: "resource id must be a single non-empty segment".to_string(),
        }
        .into());
    }
    ApiPath::new(R::COLLECTION)?.join(id)
}
