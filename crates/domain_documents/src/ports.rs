//! Store port and joined-record gathering
//!
//! The document adapters read the booking plus its joined records through
//! this port. Reads are idempotent, so there are no retries: the booking
//! itself is fatal when missing, every secondary record degrades to a
//! placeholder. The secondary reads fan out concurrently and join before
//! any computation starts; everything after the gather is pure.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use core_kernel::{BookingId, DomainPort, LocationId, PortError, RenterId, VehicleId};
use domain_booking::{Booking, RentalLocation, RenterProfile, VehicleSummary};

use crate::document::{DocumentKind, RentalDocument};
use crate::error::DocumentError;

/// Read/write port for booking data and persisted documents
#[async_trait]
pub trait RentalStore: DomainPort {
    /// Fetches the primary booking record
    async fn fetch_booking(&self, id: BookingId) -> Result<Booking, PortError>;

    /// Fetches a renter profile
    async fn fetch_renter(&self, id: RenterId) -> Result<RenterProfile, PortError>;

    /// Fetches a vehicle summary
    async fn fetch_vehicle(&self, id: VehicleId) -> Result<VehicleSummary, PortError>;

    /// Fetches a rental location
    async fn fetch_location(&self, id: LocationId) -> Result<RentalLocation, PortError>;

    /// Fetches the persisted document for a booking, if one exists
    async fn fetch_document(
        &self,
        booking_id: BookingId,
        kind: DocumentKind,
    ) -> Result<Option<RentalDocument>, PortError>;

    /// Persists a document
    async fn save_document(&self, document: RentalDocument) -> Result<(), PortError>;
}

/// The booking and its joined records, gathered before rendering
///
/// Every secondary record is optional; a missing one renders as "N/A".
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub booking: Booking,
    pub renter: Option<RenterProfile>,
    pub vehicle: Option<VehicleSummary>,
    pub pickup: Option<RentalLocation>,
    pub dropoff: Option<RentalLocation>,
}

/// Fetches the booking and fans out the secondary reads
///
/// # Errors
///
/// `BookingNotFound` when the primary record is missing; any other store
/// failure on the primary read is surfaced as-is. Secondary failures are
/// logged and degraded, never propagated.
pub async fn gather<S: RentalStore>(
    store: &S,
    booking_id: BookingId,
) -> Result<DocumentContext, DocumentError> {
    let booking = match store.fetch_booking(booking_id).await {
        Ok(booking) => booking,
        Err(error) if error.is_not_found() => {
            return Err(DocumentError::BookingNotFound(booking_id.to_string()));
        }
        Err(error) => return Err(error.into()),
    };

    let (renter, vehicle, pickup, dropoff) = tokio::join!(
        store.fetch_renter(booking.renter_id),
        store.fetch_vehicle(booking.vehicle_id),
        store.fetch_location(booking.pickup_location_id),
        store.fetch_location(booking.dropoff_location_id),
    );

    Ok(DocumentContext {
        booking,
        renter: degrade(renter, "renter profile"),
        vehicle: degrade(vehicle, "vehicle summary"),
        pickup: degrade(pickup, "pickup location"),
        dropoff: degrade(dropoff, "drop-off location"),
    })
}

fn degrade<T>(result: Result<T, PortError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(%error, record = what, "secondary read failed, rendering placeholder");
            None
        }
    }
}

/// In-memory store adapter
///
/// Backs tests and local tooling; the production adapter lives with the
/// booking-management service.
#[derive(Default)]
pub struct InMemoryRentalStore {
    bookings: RwLock<HashMap<BookingId, Booking>>,
    renters: RwLock<HashMap<RenterId, RenterProfile>>,
    vehicles: RwLock<HashMap<VehicleId, VehicleSummary>>,
    locations: RwLock<HashMap<LocationId, RentalLocation>>,
    documents: RwLock<HashMap<(BookingId, DocumentKind), RentalDocument>>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_booking(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }

    pub async fn insert_renter(&self, renter: RenterProfile) {
        self.renters.write().await.insert(renter.id, renter);
    }

    pub async fn insert_vehicle(&self, vehicle: VehicleSummary) {
        self.vehicles.write().await.insert(vehicle.id, vehicle);
    }

    pub async fn insert_location(&self, location: RentalLocation) {
        self.locations.write().await.insert(location.id, location);
    }
}

impl DomainPort for InMemoryRentalStore {}

#[async_trait]
impl RentalStore for InMemoryRentalStore {
    async fn fetch_booking(&self, id: BookingId) -> Result<Booking, PortError> {
        self.bookings
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Booking", id))
    }

    async fn fetch_renter(&self, id: RenterId) -> Result<RenterProfile, PortError> {
        self.renters
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("RenterProfile", id))
    }

    async fn fetch_vehicle(&self, id: VehicleId) -> Result<VehicleSummary, PortError> {
        self.vehicles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("VehicleSummary", id))
    }

    async fn fetch_location(&self, id: LocationId) -> Result<RentalLocation, PortError> {
        self.locations
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("RentalLocation", id))
    }

    async fn fetch_document(
        &self,
        booking_id: BookingId,
        kind: DocumentKind,
    ) -> Result<Option<RentalDocument>, PortError> {
        Ok(self.documents.read().await.get(&(booking_id, kind)).cloned())
    }

    async fn save_document(&self, document: RentalDocument) -> Result<(), PortError> {
        self.documents
            .write()
            .await
            .insert((document.booking_id, document.kind), document);
        Ok(())
    }
}
