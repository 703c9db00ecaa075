//! The registry read interface.

use async_trait::async_trait;
use std::sync::Arc;

use veridia_types::{LandId, LandRecord, LandStatus};

use crate::RegistryError;

/// Read-only view of a land registry contract.
///
/// `contract` is the account the registry module is published under. A
/// parcel that does not exist is `Ok(None)`, never an error; errors mean the
/// registry could not be asked.
#[async_trait]
pub trait RegistryReader: Send + Sync {
    /// Fetch the record for `land_id`.
    async fn get_land(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandRecord>, RegistryError>;

    /// Whether a parcel with `land_id` has been registered.
    async fn land_exists(&self, contract: &str, land_id: LandId) -> Result<bool, RegistryError>;

    /// Current status of `land_id`, if the parcel exists.
    async fn land_status(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandStatus>, RegistryError>;

    /// The id the registry will assign to the next registration.
    async fn next_land_id(&self, contract: &str) -> Result<LandId, RegistryError>;
}

#[async_trait]
impl<T: RegistryReader + ?Sized> RegistryReader for Arc<T> {
    async fn get_land(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandRecord>, RegistryError> {
        (**self).get_land(contract, land_id).await
    }

    async fn land_exists(&self, contract: &str, land_id: LandId) -> Result<bool, RegistryError> {
        (**self).land_exists(contract, land_id).await
    }

    async fn land_status(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandStatus>, RegistryError> {
        (**self).land_status(contract, land_id).await
    }

    async fn next_land_id(&self, contract: &str) -> Result<LandId, RegistryError> {
        (**self).next_land_id(contract).await
    }
}
