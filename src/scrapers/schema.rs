//! Markup signatures and vocabulary of the listing site.
//!
//! A redesign of the site should only touch this file.

use crate::models::EnergyRating;
use crate::scrapers::markup::Locator;

// Detail page

pub const TITLE: Locator = Locator::class("span", "main-info__title-main");
pub const LOCATION: Locator = Locator::class("span", "main-info__title-minor");
pub const PRICE: Locator = Locator::class("span", "txt-bold");

pub const FEATURES_PRIMARY: Locator = Locator::class("div", "details-property-feature-one");
pub const FEATURES_SECONDARY: Locator = Locator::class("div", "details-property-feature-two");
pub const FEATURE_GROUP: Locator = Locator::class("div", "details-property_features");
pub const FEATURE_ITEM: Locator = Locator::tag("li");

pub const DESCRIPTION: [Locator; 2] = [
    Locator::class("div", "adCommentsLanguage expandable is-expandable"),
    Locator::class(
        "div",
        "adCommentsLanguage expandable is-expandable with-expander-button",
    ),
];
pub const PARAGRAPH: Locator = Locator::tag("p");

pub const PHOTOS_LABEL: Locator = Locator::class("span", "multimedia-shortcuts-button-text");
pub const ADVERTISER_NAME: Locator = Locator::class("div", "name");

pub const LUXURY_TAGS: Locator = Locator::class("div", "detail-info-tags");
pub const LUXURY_TAG: Locator = Locator::class("span", "tag");

pub const VIDEO: [Locator; 1] = [Locator::class(
    "button",
    "multimedia-shortcuts-button btn video",
)];
pub const VIRTUAL_TOUR: [Locator; 2] = [
    Locator::class(
        "button",
        "multimedia-shortcuts-button btn icon-virtual-tour-outline",
    ),
    Locator::class("button", "multimedia-shortcuts-button btn virtual-tour"),
];
pub const TOUR_3D: [Locator; 1] = [Locator::class(
    "button",
    "multimedia-shortcuts-button btn three-d-tour",
)];
pub const HOMESTAGING: [Locator; 1] = [Locator::id("div", "homestaging")];
pub const PLANE: [Locator; 2] = [
    Locator::class("button", "multimedia-shortcuts-button btn icon-pics-outline"),
    Locator::class("button", "multimedia-shortcuts-button btn plan"),
];

pub const CONSUME_TICKETS: [(EnergyRating, Locator); 7] = [
    (EnergyRating::A, Locator::class("span", "energy-certificate-img-ticket-left left-a")),
    (EnergyRating::B, Locator::class("span", "energy-certificate-img-ticket-left left-b")),
    (EnergyRating::C, Locator::class("span", "energy-certificate-img-ticket-left left-c")),
    (EnergyRating::D, Locator::class("span", "energy-certificate-img-ticket-left left-d")),
    (EnergyRating::E, Locator::class("span", "energy-certificate-img-ticket-left left-e")),
    (EnergyRating::F, Locator::class("span", "energy-certificate-img-ticket-left left-f")),
    (EnergyRating::G, Locator::class("span", "energy-certificate-img-ticket-left left-g")),
];
pub const EMISSION_TICKETS: [(EnergyRating, Locator); 7] = [
    (EnergyRating::A, Locator::class("span", "energy-certificate-img-ticket-right right-a")),
    (EnergyRating::B, Locator::class("span", "energy-certificate-img-ticket-right right-b")),
    (EnergyRating::C, Locator::class("span", "energy-certificate-img-ticket-right right-c")),
    (EnergyRating::D, Locator::class("span", "energy-certificate-img-ticket-right right-d")),
    (EnergyRating::E, Locator::class("span", "energy-certificate-img-ticket-right right-e")),
    (EnergyRating::F, Locator::class("span", "energy-certificate-img-ticket-right right-f")),
    (EnergyRating::G, Locator::class("span", "energy-certificate-img-ticket-right right-g")),
];
pub const SPAN: Locator = Locator::tag("span");
/// Index of the certificate group among the secondary feature groups
pub const CERTIFICATE_GROUP: usize = 1;
pub const CONSUME_ITEM: usize = 0;
pub const EMISSION_ITEM: usize = 1;

// Index page

pub const LISTING_ITEMS: Locator = Locator::class("main", "listing-items");
pub const PAGINATION: Locator = Locator::class("div", "pagination");
pub const SELECTED_PAGE: Locator = Locator::class("li", "selected");
pub const ARTICLE: Locator = Locator::tag("article");
pub const ARTICLE_ID_ATTR: &str = "data-element-id";

// Vocabulary, matched against lower-cased text

pub const FLAT_KEYWORD: &str = "piso";
pub const BUILT_AREA_KEYWORD: &str = "construidos";
/// Case-sensitive, checked on the raw item text
pub const USABLE_AREA_KEYWORD: &str = "útiles";
pub const STATUS_KEYWORDS: &[&str] = &["segunda mano"];
pub const FLOOR_KEYWORDS: &[&str] = &["planta"];
pub const ROOM_KEYWORDS: &[&str] = &["habitaciones", "habitación"];
pub const BATHROOM_KEYWORDS: &[&str] = &["baños", "baño"];
pub const PARTICULAR_KEYWORD: &str = "particular";
pub const AIR_CONDITIONING_KEYWORDS: &[&str] = &["aire acondicionado"];
pub const HEATING_KEYWORDS: &[&str] = &["calefacción"];
pub const TERRACE_KEYWORDS: &[&str] = &["terraza", "balcón"];

/// (keyword, verdict) pairs tried in order on each item
pub const ELEVATOR_VERDICTS: &[(&str, bool)] = &[("con ascensor", true), ("sin ascensor", false)];
pub const FURNISHED_VERDICTS: &[(&str, bool)] = &[("amueblado", true), ("sin amueblar", false)];
