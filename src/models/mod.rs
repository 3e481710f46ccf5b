use serde::Serialize;
use std::fmt;

/// Identifier of one advertisement on the listing site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListingIdentifier(pub u64);

impl fmt::Display for ListingIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of property, guessed from the advertisement title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Flat,
    House,
}

impl PropertyType {
    /// "flat" when the normalised title mentions a "piso", "house" otherwise.
    pub fn from_title(title: &str) -> Self {
        let normalised = crate::scrapers::extractors::collapse_whitespace(&title.to_lowercase());
        if normalised.contains(crate::scrapers::schema::FLAT_KEYWORD) {
            PropertyType::Flat
        } else {
            PropertyType::House
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Flat => "flat",
            PropertyType::House => "house",
        }
    }
}

/// Energy certificate letter, best (A) to worst (G)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyRating {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyRating {
    pub const ALL: [EnergyRating; 7] = [
        EnergyRating::A,
        EnergyRating::B,
        EnergyRating::C,
        EnergyRating::D,
        EnergyRating::E,
        EnergyRating::F,
        EnergyRating::G,
    ];

    pub fn letter(&self) -> char {
        match self {
            EnergyRating::A => 'A',
            EnergyRating::B => 'B',
            EnergyRating::C => 'C',
            EnergyRating::D => 'D',
            EnergyRating::E => 'E',
            EnergyRating::F => 'F',
            EnergyRating::G => 'G',
        }
    }

    /// Case-insensitive; anything outside A..G is rejected.
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|rating| rating.letter() == upper)
    }
}

/// One cell of a listing record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Bool(bool),
    Absent,
}

impl FieldValue {
    /// Tabular rendering: absent values are empty cells.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Text(value) => value.clone(),
            FieldValue::Bool(true) => "True".to_string(),
            FieldValue::Bool(false) => "False".to_string(),
            FieldValue::Absent => String::new(),
        }
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Int)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Text)
    }
}

impl From<Option<bool>> for FieldValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Bool)
    }
}

impl From<Option<EnergyRating>> for FieldValue {
    fn from(value: Option<EnergyRating>) -> Self {
        value.map_or(FieldValue::Absent, |rating| {
            FieldValue::Text(rating.letter().to_string())
        })
    }
}

/// Column names of a listing record, in output order
pub const FIELD_NAMES: [&str; 25] = [
    "title",
    "location",
    "price",
    "m2",
    "type",
    "status",
    "floor",
    "description",
    "n_photos",
    "n_rooms",
    "n_bathrooms",
    "particular",
    "luxury",
    "video",
    "virtual_tour",
    "3d_tour",
    "homestaging",
    "plane",
    "air_conditioning",
    "heating",
    "elevator",
    "furnished",
    "terrace",
    "consume",
    "emisions",
];

/// Everything extracted from one detail page.
///
/// `bool` fields default to false when the markup says nothing; `Option<bool>`
/// fields keep "unknown" apart from "confirmed absent".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub title: String,
    pub location: String,
    pub price: i64,
    pub m2: Option<i32>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: Option<String>,
    pub floor: Option<i32>,
    pub description: Option<String>,
    pub n_photos: Option<u32>,
    pub n_rooms: Option<u32>,
    pub n_bathrooms: Option<u32>,
    pub particular: bool,
    pub luxury: bool,
    pub video: bool,
    pub virtual_tour: bool,
    #[serde(rename = "3d_tour")]
    pub tour_3d: bool,
    pub homestaging: bool,
    pub plane: bool,
    pub air_conditioning: bool,
    pub heating: Option<String>,
    pub elevator: Option<bool>,
    pub furnished: Option<bool>,
    pub terrace: Option<String>,
    pub consume: Option<EnergyRating>,
    pub emisions: Option<EnergyRating>,
}

impl ListingRecord {
    /// Field name / value pairs in the order of [`FIELD_NAMES`].
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let values = [
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.location.clone()),
            FieldValue::Int(self.price),
            self.m2.map(i64::from).into(),
            FieldValue::Text(self.property_type.as_str().to_string()),
            self.status.clone().into(),
            self.floor.map(i64::from).into(),
            self.description.clone().into(),
            self.n_photos.map(i64::from).into(),
            self.n_rooms.map(i64::from).into(),
            self.n_bathrooms.map(i64::from).into(),
            FieldValue::Bool(self.particular),
            FieldValue::Bool(self.luxury),
            FieldValue::Bool(self.video),
            FieldValue::Bool(self.virtual_tour),
            FieldValue::Bool(self.tour_3d),
            FieldValue::Bool(self.homestaging),
            FieldValue::Bool(self.plane),
            FieldValue::Bool(self.air_conditioning),
            self.heating.clone().into(),
            self.elevator.into(),
            self.furnished.into(),
            self.terrace.clone().into(),
            self.consume.into(),
            self.emisions.into(),
        ];

        FIELD_NAMES.into_iter().zip(values).collect()
    }
}

/// A listing record tagged with the identifier it was scraped for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRecord {
    pub id: ListingIdentifier,
    #[serde(flatten)]
    pub record: ListingRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ListingRecord {
        ListingRecord {
            title: "Piso en venta en calle Reino Unido".to_string(),
            location: "Buenavista-Valparaíso-La Legua, Toledo".to_string(),
            price: 304_900,
            m2: Some(120),
            property_type: PropertyType::Flat,
            status: None,
            floor: Some(1),
            description: None,
            n_photos: Some(41),
            n_rooms: Some(3),
            n_bathrooms: Some(2),
            particular: false,
            luxury: false,
            video: false,
            virtual_tour: true,
            tour_3d: false,
            homestaging: true,
            plane: true,
            air_conditioning: true,
            heating: Some("Calefacción individual: Gas natural".to_string()),
            elevator: Some(true),
            furnished: None,
            terrace: None,
            consume: Some(EnergyRating::D),
            emisions: Some(EnergyRating::D),
        }
    }

    #[test]
    fn test_fields_follow_fixed_order() {
        let record = sample_record();
        let names: Vec<&str> = record.fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, FIELD_NAMES.to_vec());
    }

    #[test]
    fn test_serialized_record_has_exact_keys() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), FIELD_NAMES.len());
        for name in FIELD_NAMES {
            assert!(object.contains_key(name), "missing key {}", name);
        }
        assert!(object["status"].is_null());
        assert_eq!(object["type"], "flat");
        assert_eq!(object["consume"], "D");
    }

    #[test]
    fn test_zone_record_puts_id_alongside_fields() {
        let zone_record = ZoneRecord {
            id: ListingIdentifier(97_612_345),
            record: sample_record(),
        };
        let value = serde_json::to_value(zone_record).unwrap();

        assert_eq!(value["id"], 97_612_345);
        assert_eq!(value.as_object().unwrap().len(), FIELD_NAMES.len() + 1);
    }

    #[test]
    fn test_cells_render_absent_as_empty() {
        assert_eq!(FieldValue::Absent.to_cell(), "");
        assert_eq!(FieldValue::Bool(true).to_cell(), "True");
        assert_eq!(FieldValue::Int(304_900).to_cell(), "304900");
    }

    #[test]
    fn test_property_type_from_title() {
        assert_eq!(
            PropertyType::from_title("Piso en venta en calle Reino Unido"),
            PropertyType::Flat
        );
        assert_eq!(PropertyType::from_title("Chalet en venta"), PropertyType::House);
        assert_eq!(PropertyType::from_title("ÁTICO-PISO\n en venta"), PropertyType::Flat);
    }

    #[test]
    fn test_energy_rating_letters() {
        assert_eq!(EnergyRating::from_letter('d'), Some(EnergyRating::D));
        assert_eq!(EnergyRating::from_letter('Z'), None);
    }
}
