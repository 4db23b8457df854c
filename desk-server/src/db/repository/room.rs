//! Room Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Room, RoomCreate, RoomType, RoomUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active rooms
    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room WHERE is_active = true ORDER BY room_number")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    /// Find all active rooms, optionally filtered by room type
    pub async fn find_active(&self, room_type: Option<RoomType>) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = match room_type {
            Some(rt) => {
                self.base
                    .db()
                    .query("SELECT * FROM room WHERE is_active = true AND room_type = $room_type ORDER BY room_number")
                    .bind(("room_type", rt))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM room WHERE is_active = true ORDER BY room_number")
                    .await?
                    .take(0)?
            }
        };
        Ok(rooms)
    }

    /// Find room by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let room: Option<Room> = self.base.db().select(thing).await?;
        Ok(room)
    }

    /// Find room by room number
    pub async fn find_by_number(&self, room_number: &str) -> RepoResult<Option<Room>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room WHERE room_number = $room_number LIMIT 1")
            .bind(("room_number", room_number.to_string()))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    /// Create a new room
    pub async fn create(&self, data: RoomCreate) -> RepoResult<Room> {
        // Room numbers are the operator-facing key — keep them unique
        if self.find_by_number(&data.room_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                data.room_number
            )));
        }

        let room = Room {
            id: None,
            room_number: data.room_number,
            room_type: data.room_type,
            price_per_night: data.price_per_night,
            amenities: data.amenities,
            max_occupancy: data.max_occupancy,
            description: data.description,
            is_active: true,
            created_at: shared::now_millis(),
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    /// Update a room
    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        // Check duplicate number if changing it
        if let Some(new_number) = &data.room_number
            && let Some(found) = self.find_by_number(new_number).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                new_number
            )));
        }

        let room_number = data.room_number.unwrap_or(existing.room_number);
        let room_type = data.room_type.unwrap_or(existing.room_type);
        let price_per_night = data.price_per_night.unwrap_or(existing.price_per_night);
        let amenities = data.amenities.unwrap_or(existing.amenities);
        let max_occupancy = data.max_occupancy.unwrap_or(existing.max_occupancy);
        let description = data.description.unwrap_or(existing.description);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query("UPDATE $thing SET room_number = $room_number, room_type = $room_type, price_per_night = $price_per_night, amenities = $amenities, max_occupancy = $max_occupancy, description = $description, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("room_number", room_number))
            .bind(("room_type", room_type))
            .bind(("price_per_night", price_per_night))
            .bind(("amenities", amenities))
            .bind(("max_occupancy", max_occupancy))
            .bind(("description", description))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    /// Soft delete a room (bookings keep referencing it for history)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Room {} not found", id)));
        }

        self.base
            .db()
            .query("UPDATE $thing SET is_active = false")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
