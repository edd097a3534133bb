use serde::{Deserialize, Serialize};

/// Postal location embedded in a [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UserLocation {
    pub street_number: String,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postcode: String,
}

/// A user as fetched from the remote API and stored in the local cache.
///
/// The email is the identity: two users with the same email are the same
/// record, and a later write replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct User {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub thumbnail_url: String,
    pub large_picture_url: String,
    pub nationality: String,
    pub location: UserLocation,
}

impl User {
    /// Identity of the user (the email address)
    pub fn id(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.title, self.first_name, self.last_name)
    }

    pub fn formatted_location(&self) -> String {
        let location = &self.location;
        format!(
            "{} {}, {} {}, {}, {}",
            location.street_number,
            location.street_name,
            location.postcode,
            location.city,
            location.state,
            location.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_user() -> User {
        User {
            title: "Ms".to_string(),
            first_name: "Lydia".to_string(),
            last_name: "Garcia".to_string(),
            email: "lydia.garcia@example.com".to_string(),
            phone: "912-345-678".to_string(),
            thumbnail_url: "https://randomuser.me/api/portraits/thumb/women/1.jpg".to_string(),
            large_picture_url: "https://randomuser.me/api/portraits/women/1.jpg".to_string(),
            nationality: "ES".to_string(),
            location: UserLocation {
                street_number: "4512".to_string(),
                street_name: "Calle de Alcalá".to_string(),
                city: "Madrid".to_string(),
                state: "Comunidad de Madrid".to_string(),
                country: "Spain".to_string(),
                postcode: "28014".to_string(),
            },
        }
    }

    #[test]
    fn test_id_is_email() {
        let user = create_test_user();
        assert_eq!(user.id(), "lydia.garcia@example.com");
    }

    #[test]
    fn test_full_name() {
        let user = create_test_user();
        assert_eq!(user.full_name(), "Ms Lydia Garcia");
    }

    #[test]
    fn test_formatted_location() {
        let user = create_test_user();
        assert_eq!(
            user.formatted_location(),
            "4512 Calle de Alcalá, 28014 Madrid, Comunidad de Madrid, Spain"
        );
    }
}
