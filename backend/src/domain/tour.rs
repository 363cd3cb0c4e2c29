//! Tourism records published by the Korea Tourism Organization.
//!
//! These types are read-only snapshots of provider data; nothing here is
//! persisted locally. Provider fields that arrive as empty strings are
//! normalised to `None` by the outbound adapter before reaching the domain.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::coordinates::{self, CoordinateError, Coordinates};

/// Timestamp layout used by the provider for `createdtime`/`modifiedtime`.
pub const PROVIDER_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Validation errors for [`ContentId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentIdError {
    /// The identifier was blank.
    #[error("content id must not be empty")]
    Empty,
    /// The identifier contained something other than ASCII digits.
    #[error("content id must contain only digits")]
    NonNumeric,
}

/// Provider identifier for one attraction record.
///
/// Identifiers are opaque but always numeric; anything else cannot match a
/// provider record and is rejected before an outbound call is made.
///
/// # Examples
/// ```
/// use mytrip::domain::ContentId;
///
/// assert!(ContentId::new("126508").is_ok());
/// assert!(ContentId::new("12a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Validate and construct a content identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContentIdError> {
        Self::from_owned(raw.as_ref().to_owned())
    }

    fn from_owned(raw: String) -> Result<Self, ContentIdError> {
        if raw.is_empty() {
            return Err(ContentIdError::Empty);
        }
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContentIdError::NonNumeric);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContentId> for String {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = ContentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Attraction category as defined by the provider's `contentTypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    /// 관광지 (12).
    TouristSpot,
    /// 문화시설 (14).
    CulturalFacility,
    /// 축제/행사 (15).
    Festival,
    /// 여행코스 (25).
    TravelCourse,
    /// 레포츠 (28).
    Leisure,
    /// 숙박 (32).
    Accommodation,
    /// 쇼핑 (38).
    Shopping,
    /// 음식점 (39).
    Restaurant,
}

impl ContentType {
    /// Every content type in provider code order.
    pub const ALL: [Self; 8] = [
        Self::TouristSpot,
        Self::CulturalFacility,
        Self::Festival,
        Self::TravelCourse,
        Self::Leisure,
        Self::Accommodation,
        Self::Shopping,
        Self::Restaurant,
    ];

    /// Provider code sent as `contentTypeId`.
    pub fn code(self) -> &'static str {
        match self {
            Self::TouristSpot => "12",
            Self::CulturalFacility => "14",
            Self::Festival => "15",
            Self::TravelCourse => "25",
            Self::Leisure => "28",
            Self::Accommodation => "32",
            Self::Shopping => "38",
            Self::Restaurant => "39",
        }
    }

    /// Korean display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TouristSpot => "관광지",
            Self::CulturalFacility => "문화시설",
            Self::Festival => "축제/행사",
            Self::TravelCourse => "여행코스",
            Self::Leisure => "레포츠",
            Self::Accommodation => "숙박",
            Self::Shopping => "쇼핑",
            Self::Restaurant => "음식점",
        }
    }

    /// Resolve a provider code.
    ///
    /// # Examples
    /// ```
    /// use mytrip::domain::ContentType;
    ///
    /// assert_eq!(ContentType::from_code("39"), Some(ContentType::Restaurant));
    /// assert_eq!(ContentType::from_code("99"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code.trim())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metropolitan city or province with its provider area code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Provider `areaCode`.
    pub code: &'static str,
    /// Korean display name.
    pub name: &'static str,
}

/// Fixed region table used for statistics and labels.
pub const REGIONS: [Region; 17] = [
    Region { code: "1", name: "서울" },
    Region { code: "2", name: "인천" },
    Region { code: "3", name: "대전" },
    Region { code: "4", name: "대구" },
    Region { code: "5", name: "광주" },
    Region { code: "6", name: "부산" },
    Region { code: "7", name: "울산" },
    Region { code: "8", name: "세종" },
    Region { code: "31", name: "경기" },
    Region { code: "32", name: "강원" },
    Region { code: "33", name: "충북" },
    Region { code: "34", name: "충남" },
    Region { code: "35", name: "경북" },
    Region { code: "36", name: "경남" },
    Region { code: "37", name: "전북" },
    Region { code: "38", name: "전남" },
    Region { code: "39", name: "제주" },
];

/// Look up the Korean name for a provider area code.
pub fn region_name(code: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|region| region.code == code.trim())
        .map(|region| region.name)
}

/// Entry of the provider's area code table (`areaCode2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCode {
    /// Provider area code.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// Summary record returned by listing and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourItem {
    /// Provider content identifier.
    pub content_id: String,
    /// Provider content type code.
    pub content_type_id: String,
    /// Attraction name.
    pub title: String,
    /// Street address.
    pub addr1: Option<String>,
    /// Address detail.
    pub addr2: Option<String>,
    /// Provider area code.
    pub area_code: Option<String>,
    /// Provider district code.
    pub sigungu_code: Option<String>,
    /// Longitude in the provider's encoding.
    pub map_x: String,
    /// Latitude in the provider's encoding.
    pub map_y: String,
    /// Primary image URL.
    pub first_image: Option<String>,
    /// Secondary (thumbnail) image URL.
    pub first_image2: Option<String>,
    /// Contact number.
    pub tel: Option<String>,
    /// Top-level category code.
    pub cat1: Option<String>,
    /// Mid-level category code.
    pub cat2: Option<String>,
    /// Leaf category code.
    pub cat3: Option<String>,
    /// Registration timestamp, `YYYYMMDDHHmmss`.
    pub created_time: Option<String>,
    /// Last modification timestamp, `YYYYMMDDHHmmss`.
    pub modified_time: Option<String>,
}

impl TourItem {
    /// Parsed content type, when the code is known.
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::from_code(&self.content_type_id)
    }

    /// Region name for the item's area code.
    pub fn region_name(&self) -> Option<&'static str> {
        self.area_code.as_deref().and_then(region_name)
    }

    /// Convert the provider coordinates into WGS84 degrees.
    pub fn coordinates(&self) -> Result<Coordinates, CoordinateError> {
        coordinates::convert(&self.map_x, &self.map_y)
    }

    /// Preferred image: `firstimage`, then `firstimage2`, skipping values that
    /// are not absolute HTTP(S) URLs.
    ///
    /// # Examples
    /// ```
    /// use mytrip::domain::TourItem;
    ///
    /// let item = TourItem {
    ///     first_image: Some("not-a-url".to_owned()),
    ///     first_image2: Some("https://tong.visitkorea.or.kr/a.jpg".to_owned()),
    ///     ..TourItem::default()
    /// };
    /// assert_eq!(item.thumbnail(), Some("https://tong.visitkorea.or.kr/a.jpg"));
    /// ```
    pub fn thumbnail(&self) -> Option<&str> {
        [self.first_image.as_deref(), self.first_image2.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| is_valid_image_url(url))
    }

    /// Full address joined from both address parts.
    pub fn address(&self) -> Option<String> {
        match (self.addr1.as_deref(), self.addr2.as_deref()) {
            (Some(line1), Some(line2)) => Some(format!("{line1} {line2}")),
            (Some(line), None) | (None, Some(line)) => Some(line.to_owned()),
            (None, None) => None,
        }
    }

    /// Parsed modification timestamp.
    pub fn modified_at(&self) -> Option<NaiveDateTime> {
        self.modified_time.as_deref().and_then(parse_provider_timestamp)
    }
}

/// Parse a provider `YYYYMMDDHHmmss` timestamp.
pub fn parse_provider_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), PROVIDER_TIMESTAMP_FORMAT).ok()
}

/// Whether `url` is usable as an image source.
pub fn is_valid_image_url(url: &str) -> bool {
    let trimmed = url.trim();
    trimmed.starts_with("http://") || trimmed.starts_with("https://")
}

/// Common detail record (`detailCommon2`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourDetail {
    /// Fields shared with listing records.
    pub item: TourItem,
    /// Homepage markup as published by the provider.
    pub homepage: Option<String>,
    /// Long-form description.
    pub overview: Option<String>,
    /// Postal code.
    pub zipcode: Option<String>,
    /// Label for the contact number.
    pub tel_name: Option<String>,
}

/// Type-specific operating information (`detailIntro2`).
///
/// The provider publishes a different field set for each content type, so the
/// values are kept as an ordered map of non-empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourIntro {
    /// Provider content identifier.
    pub content_id: String,
    /// Provider content type code.
    pub content_type_id: String,
    /// Non-empty type-specific fields keyed by provider field name.
    pub fields: BTreeMap<String, String>,
}

impl TourIntro {
    /// Look up one field by provider name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Gallery image (`detailImage2`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourImage {
    /// Provider content identifier.
    pub content_id: String,
    /// Full-size image URL.
    pub origin_url: String,
    /// Image caption.
    pub name: Option<String>,
    /// Provider serial number.
    pub serial_num: Option<String>,
    /// Thumbnail URL.
    pub small_url: Option<String>,
}

/// Pet travel information (`detailPetTour2`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PetTourInfo {
    /// Provider content identifier.
    pub content_id: String,
    /// Provider content type code.
    pub content_type_id: Option<String>,
    /// Leash requirement.
    pub leash: Option<String>,
    /// Allowed pet size.
    pub size: Option<String>,
    /// Areas where pets are allowed.
    pub place: Option<String>,
    /// Other notes.
    pub etc: Option<String>,
    /// Additional charge.
    pub charge: Option<String>,
    /// General pet information.
    pub info: Option<String>,
    /// Parking information.
    pub parking: Option<String>,
}

impl PetTourInfo {
    /// Strip provider markup from every free-text field, dropping fields
    /// that become empty.
    pub fn sanitised(self) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|raw| strip_html_tags(&raw))
                .filter(|text| !text.is_empty())
        };
        Self {
            content_id: self.content_id,
            content_type_id: self.content_type_id,
            leash: clean(self.leash),
            size: clean(self.size),
            place: clean(self.place),
            etc: clean(self.etc),
            charge: clean(self.charge),
            info: clean(self.info),
            parking: clean(self.parking),
        }
    }

    /// Whether no descriptive field is present.
    pub fn is_empty(&self) -> bool {
        [
            &self.leash,
            &self.size,
            &self.place,
            &self.etc,
            &self.charge,
            &self.info,
            &self.parking,
        ]
        .into_iter()
        .all(Option::is_none)
    }
}

/// Remove HTML tags and collapse whitespace.
///
/// `<br>` variants become line breaks so multi-line provider notes keep their
/// shape.
///
/// # Examples
/// ```
/// use mytrip::domain::strip_html_tags;
///
/// assert_eq!(strip_html_tags("<b>소형견</b> 가능<br/>목줄 필수"), "소형견 가능\n목줄 필수");
/// ```
pub fn strip_html_tags(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut tag = String::new();
    let mut in_tag = false;
    for c in raw.chars() {
        match (in_tag, c) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (true, '>') => {
                in_tag = false;
                let name = tag.trim().trim_start_matches('/').trim_end_matches('/');
                if name.trim().eq_ignore_ascii_case("br") {
                    text.push('\n');
                }
            }
            (true, other) => tag.push(other),
            (false, other) => text.push(other),
        }
    }

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
