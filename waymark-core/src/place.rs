//! Points of interest shown in the guide.

use geo::Coord;

/// Identifier assigned to a place by the store.
pub type PlaceId = i64;

/// Identifier reserved for the "current location" route start point.
///
/// Any non-positive identifier is treated as synthetic and never persisted
/// as part of a route.
pub const CURRENT_LOCATION_ID: PlaceId = -1;

/// Fallback position used for the current location when the caller has no
/// better fix (central Moscow).
pub const DEFAULT_CURRENT_LOCATION: Coord<f64> = Coord {
    x: 37.6173,
    y: 55.7558,
};

/// A location worth visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::NewPlace;
///
/// let place = NewPlace::new("Hermitage", "Art museum", "Museums", Coord { x: 30.3146, y: 59.9398 })
///     .with_rating(4.8)
///     .into_place(7);
///
/// assert_eq!(place.id, 7);
/// assert!(!place.favorite);
/// assert!((place.latitude() - 59.9398).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Store-assigned identifier; negative values mark synthetic entries.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category label, e.g. `Museums`.
    pub category: String,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Optional illustration.
    pub image_url: Option<String>,
    /// Rating in stars; `0.0` when unrated.
    pub rating: f32,
    /// Whether the user marked the place as a favorite.
    pub favorite: bool,
    /// Whether the place is kept for offline use.
    pub offline_available: bool,
}

impl Place {
    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Whether the place came from the store rather than being synthesised.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Build the synthetic "current location" place used as a route start.
    ///
    /// # Examples
    /// ```
    /// use waymark_core::{CURRENT_LOCATION_ID, DEFAULT_CURRENT_LOCATION, Place};
    ///
    /// let here = Place::current_location(DEFAULT_CURRENT_LOCATION);
    /// assert_eq!(here.id, CURRENT_LOCATION_ID);
    /// assert!(!here.is_persisted());
    /// ```
    #[must_use]
    pub fn current_location(location: Coord<f64>) -> Self {
        NewPlace::new(
            "My current location",
            "Your current position",
            "Location",
            location,
        )
        .into_place(CURRENT_LOCATION_ID)
    }
}

/// A place that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewPlace {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Optional illustration.
    pub image_url: Option<String>,
    /// Rating in stars.
    pub rating: f32,
    /// Initial favorite flag.
    pub favorite: bool,
    /// Initial offline flag.
    pub offline_available: bool,
}

impl NewPlace {
    /// Construct an unrated, non-favorite place.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            location,
            image_url: None,
            rating: 0.0,
            favorite: false,
            offline_available: false,
        }
    }

    /// Attach an illustration URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    /// Attach the identifier chosen by a store.
    #[must_use]
    pub fn into_place(self, id: PlaceId) -> Place {
        Place {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            location: self.location,
            image_url: self.image_url,
            rating: self.rating,
            favorite: self.favorite,
            offline_available: self.offline_available,
        }
    }
}
