//! DTOs for decoding KorService2 JSON envelopes.
//!
//! Rows are kept as loose JSON maps because the provider mixes numbers and
//! strings for the same field and publishes an open field set for
//! `detailIntro2`. Mapping into domain records happens in one pass here.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::result_codes::{SUCCESS_CODE, friendly_message};
use crate::domain::ports::TourSourceError;
use crate::domain::{AreaCode, PetTourInfo, TourDetail, TourImage, TourIntro, TourItem};

#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto {
    response: ResponseDto,
}

#[derive(Debug, Deserialize)]
struct ResponseDto {
    header: HeaderDto,
    #[serde(default)]
    body: Option<BodyDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeaderDto {
    result_code: String,
    #[serde(default)]
    result_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyDto {
    #[serde(default, deserialize_with = "lenient_items")]
    items: Option<ItemsDto>,
    #[serde(default)]
    total_count: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ItemsDto {
    #[serde(default)]
    item: Option<OneOrMany<RowDto>>,
}

/// `items` is an object wrapping `item`, or an empty string when there are
/// no rows.
fn lenient_items<'de, D>(deserializer: D) -> Result<Option<ItemsDto>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// One provider row.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub(super) struct RowDto(Map<String, Value>);

/// Normalised rows with the provider's total.
#[derive(Debug, Default)]
pub(super) struct Listing {
    pub(super) rows: Vec<RowDto>,
    pub(super) total_count: u64,
}

impl EnvelopeDto {
    /// Check the result code and flatten `response.body.items.item`.
    pub(super) fn into_listing(self) -> Result<Listing, TourSourceError> {
        let HeaderDto {
            result_code,
            result_msg,
        } = self.response.header;
        if result_code != SUCCESS_CODE {
            let message = friendly_message(&result_code, result_msg.as_deref());
            return Err(TourSourceError::provider(result_code, message));
        }

        let Some(body) = self.response.body else {
            return Ok(Listing::default());
        };
        let total_count = body.total_count.as_ref().map_or(0, count_value);
        let rows = match body.items.and_then(|items| items.item) {
            Some(OneOrMany::Many(rows)) => rows,
            Some(OneOrMany::One(row)) => vec![row],
            None => Vec::new(),
        };
        Ok(Listing { rows, total_count })
    }
}

fn count_value(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number.as_u64().unwrap_or(0),
        Value::String(raw) => raw.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Decode a response body into a listing.
pub(super) fn decode_listing(body: &[u8]) -> Result<Listing, TourSourceError> {
    let envelope: EnvelopeDto = serde_json::from_slice(body).map_err(|error| {
        TourSourceError::decode(format!("invalid KorService2 JSON payload: {error}"))
    })?;
    envelope.into_listing()
}

const IDENTITY_FIELDS: [&str; 2] = ["contentid", "contenttypeid"];

impl RowDto {
    /// Trimmed, non-empty text for `key`; numbers are rendered as text.
    fn text(&self, key: &str) -> Option<String> {
        value_text(self.0.get(key)?)
    }

    fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    pub(super) fn into_area_code(self) -> AreaCode {
        AreaCode {
            code: self.text_or_empty("code"),
            name: self.text_or_empty("name"),
        }
    }

    pub(super) fn into_tour_item(self) -> TourItem {
        TourItem {
            content_id: self.text_or_empty("contentid"),
            content_type_id: self.text_or_empty("contenttypeid"),
            title: self.text_or_empty("title"),
            addr1: self.text("addr1"),
            addr2: self.text("addr2"),
            area_code: self.text("areacode"),
            sigungu_code: self.text("sigungucode"),
            map_x: self.text_or_empty("mapx"),
            map_y: self.text_or_empty("mapy"),
            first_image: self.text("firstimage"),
            first_image2: self.text("firstimage2"),
            tel: self.text("tel"),
            cat1: self.text("cat1"),
            cat2: self.text("cat2"),
            cat3: self.text("cat3"),
            created_time: self.text("createdtime"),
            modified_time: self.text("modifiedtime"),
        }
    }

    pub(super) fn into_tour_detail(self) -> TourDetail {
        TourDetail {
            homepage: self.text("homepage"),
            overview: self.text("overview"),
            zipcode: self.text("zipcode"),
            tel_name: self.text("telname"),
            item: self.into_tour_item(),
        }
    }

    pub(super) fn into_tour_intro(self) -> TourIntro {
        let content_id = self.text_or_empty("contentid");
        let content_type_id = self.text_or_empty("contenttypeid");
        let fields: BTreeMap<String, String> = self
            .0
            .into_iter()
            .filter(|(key, _)| !IDENTITY_FIELDS.contains(&key.as_str()))
            .filter_map(|(key, value)| value_text(&value).map(|text| (key, text)))
            .collect();
        TourIntro {
            content_id,
            content_type_id,
            fields,
        }
    }

    pub(super) fn into_tour_image(self) -> TourImage {
        TourImage {
            content_id: self.text_or_empty("contentid"),
            origin_url: self.text_or_empty("originimgurl"),
            name: self.text("imgname"),
            serial_num: self.text("serialnum"),
            small_url: self.text("smallimageurl"),
        }
    }

    pub(super) fn into_pet_tour_info(self) -> PetTourInfo {
        PetTourInfo {
            content_id: self.text_or_empty("contentid"),
            content_type_id: self.text("contenttypeid"),
            leash: self.text("chkpetleash"),
            size: self.text("chkpetsize"),
            place: self.text("chkpetplace"),
            etc: self.text("chkpetetc"),
            charge: self.text("chkpetcharge"),
            info: self.text("petinfo"),
            parking: self.text("parking"),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
