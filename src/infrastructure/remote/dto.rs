//! DTOs for decoding randomuser.me JSON responses.
//!
//! Every field is optional on the wire. The adapter decodes into these
//! transport DTOs first, then maps into domain [`User`]s in one pass; a record
//! missing a required field fails the whole page.

use serde::{Deserialize, Deserializer};

use crate::domain::{User, UserLocation};

#[derive(Debug, Deserialize)]
pub(super) struct ApiResponseDto {
    #[serde(default)]
    pub(super) results: Vec<RemoteUserDto>,
    pub(super) info: ApiInfoDto,
}

/// Echoed pagination metadata; only the page number is used
#[derive(Debug, Deserialize)]
pub(super) struct ApiInfoDto {
    pub(super) page: i32,
}

#[derive(Debug, Deserialize)]
pub(super) struct RemoteUserDto {
    name: Option<RemoteNameDto>,
    email: Option<String>,
    phone: Option<String>,
    picture: Option<RemotePictureDto>,
    nat: Option<String>,
    location: Option<RemoteLocationDto>,
}

#[derive(Debug, Deserialize)]
struct RemoteNameDto {
    title: Option<String>,
    first: Option<String>,
    last: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemotePictureDto {
    large: Option<String>,
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteLocationDto {
    street: Option<RemoteStreetDto>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    postcode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteStreetDto {
    #[serde(default, deserialize_with = "string_or_number")]
    number: Option<String>,
    name: Option<String>,
}

/// The API sends postcodes and street numbers as either strings or integers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing field `{field}`"))
}

impl ApiResponseDto {
    /// Next page cursor derived from the echoed page: `page + 1` while the
    /// server reports a positive page, otherwise the sentinel as-is. A page
    /// with no successor in `i32` ends the listing.
    pub(super) fn next_page(&self) -> i32 {
        if self.info.page > 0 {
            self.info.page.checked_add(1).unwrap_or(-1)
        } else {
            self.info.page
        }
    }

    pub(super) fn into_domain_users(self) -> Result<Vec<User>, String> {
        self.results
            .into_iter()
            .map(RemoteUserDto::into_domain_user)
            .collect()
    }
}

impl RemoteUserDto {
    fn into_domain_user(self) -> Result<User, String> {
        let email = required(self.email, "email")?;
        let name = required(self.name, "name").map_err(|e| format!("{email}: {e}"))?;
        let picture = required(self.picture, "picture").map_err(|e| format!("{email}: {e}"))?;
        let location = required(self.location, "location").map_err(|e| format!("{email}: {e}"))?;
        let street = required(location.street, "location.street")?;

        Ok(User {
            title: required(name.title, "name.title")?,
            first_name: required(name.first, "name.first")?,
            last_name: required(name.last, "name.last")?,
            phone: required(self.phone, "phone")?,
            thumbnail_url: required(picture.thumbnail, "picture.thumbnail")?,
            large_picture_url: required(picture.large, "picture.large")?,
            nationality: required(self.nat, "nat")?,
            location: UserLocation {
                street_number: required(street.number, "location.street.number")?,
                street_name: required(street.name, "location.street.name")?,
                city: required(location.city, "location.city")?,
                state: required(location.state, "location.state")?,
                country: required(location.country, "location.country")?,
                postcode: required(location.postcode, "location.postcode")?,
            },
            email,
        })
    }
}
