//! Hostel rooms and beds.

use serde::{Deserialize, Serialize};

use super::{Resource, Rules, Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    Single,
    Double,
    Triple,
    Dormitory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub room_number: String,
    #[serde(default)]
    pub floor: u32,
    pub capacity: u32,
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub status: RoomStatus,
}

impl Validate for Room {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("roomNumber", &self.room_number)
            .max_len("roomNumber", &self.room_number, 20)
            .range("floor", self.floor, 0, 100)
            .range("capacity", self.capacity, 1, 50)
            .check(
                "capacity",
                self.room_type != RoomType::Single || self.capacity <= 1,
                "A single room has a capacity of one",
            );
        rules.finish()
    }
}

impl Resource for Room {
    const COLLECTION: &'static str = "rooms";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub room_id: String,
    pub bed_number: String,
    #[serde(default)]
    pub status: BedStatus,
}

impl Validate for Bed {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("roomId", &self.room_id)
            .required("bedNumber", &self.bed_number)
            .max_len("bedNumber", &self.bed_number, 10);
        rules.finish()
    }
}

impl Resource for Bed {
    const COLLECTION: &'static str = "beds";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn room() -> Room {
        Room {
            id: None,
            room_number: "A-101".into(),
            floor: 1,
            capacity: 2,
            room_type: RoomType::Double,
            status: RoomStatus::Available,
        }
    }

    #[test]
    fn valid_room() {
        assert!(room().validate().is_ok());
    }

    #[test]
    fn room_requires_number_and_capacity() {
        let room = Room {
            room_number: "".into(),
            capacity: 0,
            ..room()
        };
        let errors = room.validate().unwrap_err();
        assert_eq!(errors.field("roomNumber"), ["Room number is required"]);
        assert_eq!(errors.field("capacity"), ["Capacity must be between 1 and 50"]);
    }

    #[test]
    fn single_room_holds_one() {
        let room = Room {
            room_type: RoomType::Single,
            ..room()
        };
        let errors = room.validate().unwrap_err();
        assert_eq!(errors.field("capacity"), ["A single room has a capacity of one"]);
    }

    #[test]
    fn room_wire_shape() {
        let room: Room = serde_json::from_value(json!({
            "id": "1",
            "roomNumber": "B-2",
            "capacity": 4,
            "roomType": "dormitory"
        }))
        .unwrap();
        assert_eq!(room.id(), Some("1"));
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.floor, 0);

        let value = serde_json::to_value(Room { id: None, ..room }).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["roomNumber"], "B-2");
    }

    #[test]
    fn bed_requires_room() {
        let bed = Bed {
            id: None,
            room_id: " ".into(),
            bed_number: "1".into(),
            status: BedStatus::Reserved,
        };
        let errors = bed.validate().unwrap_err();
        assert_eq!(errors.field("roomId"), ["Room is required"]);
    }
}
