//! Students, guardians, teachers and staff.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Resource, Rules, Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

impl Validate for Student {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("firstName", &self.first_name)
            .max_len("firstName", &self.first_name, 50)
            .required("lastName", &self.last_name)
            .max_len("lastName", &self.last_name, 50)
            .email("email", self.email.as_deref())
            .phone("phone", self.phone.as_deref())
            .not_future("dateOfBirth", self.date_of_birth);
        rules.finish()
    }
}

impl Resource for Student {
    const COLLECTION: &'static str = "students";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Validate for Guardian {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .required("relationship", &self.relationship)
            .required("phone", &self.phone)
            .phone("phone", Some(self.phone.as_str()))
            .email("email", self.email.as_deref());
        rules.finish()
    }
}

impl Resource for Guardian {
    const COLLECTION: &'static str = "guardians";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_on: Option<NaiveDate>,
}

impl Validate for Teacher {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .required("email", &self.email)
            .email("email", Some(self.email.as_str()))
            .phone("phone", self.phone.as_deref())
            .not_future("joinedOn", self.joined_on);
        rules.finish()
    }
}

impl Resource for Teacher {
    const COLLECTION: &'static str = "teachers";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Validate for Staff {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .required("role", &self.role)
            .email("email", self.email.as_deref())
            .phone("phone", self.phone.as_deref());
        rules.finish()
    }
}

impl Resource for Staff {
    const COLLECTION: &'static str = "staff";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_wire_shape() {
        let student: Student = serde_json::from_value(json!({
            "id": "s1",
            "firstName": "Amina",
            "lastName": "Rahman",
            "dateOfBirth": "2008-04-12",
            "guardianId": "g7"
        }))
        .unwrap();
        assert_eq!(student.full_name(), "Amina Rahman");
        assert_eq!(student.date_of_birth, NaiveDate::from_ymd_opt(2008, 4, 12));
        assert!(student.validate().is_ok());
    }

    #[test]
    fn student_rejects_bad_contact_details() {
        let student = Student {
            id: None,
            first_name: "Amina".into(),
            last_name: "".into(),
            email: Some("amina-at-example".into()),
            phone: Some("12".into()),
            date_of_birth: None,
            guardian_id: None,
            room_id: None,
        };
        let errors = student.validate().unwrap_err();
        assert_eq!(errors.field("lastName"), ["Last name is required"]);
        assert_eq!(errors.field("email"), ["Enter a valid email address"]);
        assert_eq!(errors.field("phone"), ["Enter a valid phone number"]);
    }

    #[test]
    fn guardian_phone_is_mandatory() {
        let guardian = Guardian {
            id: None,
            name: "Karim Rahman".into(),
            relationship: "father".into(),
            phone: "".into(),
            email: None,
        };
        let errors = guardian.validate().unwrap_err();
        assert_eq!(errors.field("phone"), ["Phone is required"]);
    }

    #[test]
    fn teacher_needs_valid_email() {
        let teacher = Teacher {
            id: None,
            name: "R. Das".into(),
            email: "rdas".into(),
            phone: None,
            subject: Some("Physics".into()),
            joined_on: None,
        };
        let errors = teacher.validate().unwrap_err();
        assert_eq!(errors.field("email"), ["Enter a valid email address"]);
    }

    #[test]
    fn staff_minimal() {
        let staff = Staff {
            id: None,
            name: "M. Hossain".into(),
            role: "cook".into(),
            email: None,
            phone: None,
        };
        assert!(staff.validate().is_ok());
        assert_eq!(Staff::COLLECTION, "staff");
    }
}
