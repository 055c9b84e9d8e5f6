use serde::{Deserialize, Deserializer, Serialize};

/// A card as served by the NetrunnerDB card API.
///
/// Field names follow the API's JSON keys so a cached `.card` file is the
/// same shape as the API response. Any field the API leaves out or sends as
/// `null` falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerCard {
    #[serde(rename = "last-modified", deserialize_with = "null_as_default")]
    pub last_modified: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub card_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtype_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "baselink", deserialize_with = "null_as_default")]
    pub base_link: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub faction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub faction_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub faction_letter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flavor: String,
    #[serde(deserialize_with = "null_as_default")]
    pub illustrator: String,
    #[serde(rename = "influencelimit", deserialize_with = "null_as_default")]
    pub influence_limit: i32,
    #[serde(rename = "minimumdecksize", deserialize_with = "null_as_default")]
    pub minimum_deck_size: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub number: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: i32,
    #[serde(rename = "setname", deserialize_with = "null_as_default")]
    pub set_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub set_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub side: String,
    #[serde(deserialize_with = "null_as_default")]
    pub side_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uniqueness: bool,
    #[serde(rename = "cyclenumber", deserialize_with = "null_as_default")]
    pub cycle_number: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "imagesrc", deserialize_with = "null_as_default")]
    pub image_src: String,
    #[serde(rename = "largeimagesrc", deserialize_with = "null_as_default")]
    pub large_image_src: String,
}

/// The API sends `null` for fields that do not apply to a card, e.g. the
/// influence limit of anything that is not an identity.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
