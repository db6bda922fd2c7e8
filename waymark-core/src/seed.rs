//! Built-in data shipped with the guide.

use geo::Coord;

use crate::{NewPlace, NewUser};

const fn at(latitude: f64, longitude: f64) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

/// Places written into a freshly created database.
#[must_use]
pub fn launch_catalogue() -> Vec<NewPlace> {
    vec![
        NewPlace::new(
            "Red Square",
            "The main square of Moscow, between the Kremlin and the historic Kitay-gorod district.",
            "Landmarks",
            at(55.7539, 37.6208),
        ),
        NewPlace::new(
            "Hermitage Museum",
            "One of the largest and most significant art and cultural history museums in the world.",
            "Museums",
            at(59.9398, 30.3146),
        ),
        NewPlace::new(
            "Lake Baikal",
            "The deepest lake on the planet and the largest natural reservoir of fresh water.",
            "Nature",
            at(53.5587, 108.1650),
        ),
        NewPlace::new(
            "Peterhof",
            "Palace and park ensemble on the southern shore of the Gulf of Finland.",
            "Parks",
            at(59.8852, 29.9004),
        ),
        NewPlace::new(
            "Tretyakov Gallery",
            "Moscow art museum holding one of the largest collections of Russian fine art.",
            "Museums",
            at(55.7416, 37.6207),
        ),
        NewPlace::new(
            "Mamayev Kurgan",
            "Hill above the Volga in Volgograd, home to the memorial to the heroes of the Battle of Stalingrad.",
            "Landmarks",
            at(48.7425, 44.5367),
        ),
        NewPlace::new(
            "Kazan Kremlin",
            "The oldest part of Kazan, a complex of architectural, historical and archaeological monuments.",
            "Landmarks",
            at(55.7989, 49.1055),
        ),
        NewPlace::new(
            "Valley of Geysers",
            "One of the largest geyser fields in the world and the only one in Eurasia, on Kamchatka.",
            "Nature",
            at(54.4343, 160.1395),
        ),
        NewPlace::new(
            "Nizhny Novgorod Kremlin",
            "Fortress in the historic centre of Nizhny Novgorod and its oldest part.",
            "Landmarks",
            at(56.3286, 44.0031),
        ),
        NewPlace::new(
            "Sochi Park",
            "The first theme park in Russia, in the Adler district of Sochi.",
            "Parks",
            at(43.4025, 39.9587),
        ),
    ]
}

/// Rated, illustrated places installed on demand.
#[must_use]
pub fn curated_places() -> Vec<NewPlace> {
    vec![
        NewPlace::new(
            "Hermitage Museum",
            "One of the largest art museums in the world, in Saint Petersburg.",
            "Museums",
            at(59.9398, 30.3146),
        )
        .with_image_url("https://example.com/hermitage.jpg")
        .with_rating(4.8),
        NewPlace::new(
            "Red Square",
            "The main square of Moscow, in the heart of the city.",
            "Landmarks",
            at(55.7539, 37.6208),
        )
        .with_image_url("https://example.com/red_square.jpg")
        .with_rating(4.7),
        NewPlace::new(
            "Gorky Park",
            "Gorky Central Park of Culture and Leisure in Moscow.",
            "Parks",
            at(55.7308, 37.6031),
        )
        .with_image_url("https://example.com/gorky_park.jpg")
        .with_rating(4.6),
        NewPlace::new(
            "Bolshoi Theatre",
            "One of the largest and most significant opera and ballet theatres in the world.",
            "Theatres",
            at(55.7602, 37.6186),
        )
        .with_image_url("https://example.com/bolshoi.jpg")
        .with_rating(4.9),
        NewPlace::new(
            "Tretyakov Gallery",
            "Moscow art museum founded by the merchant Pavel Tretyakov.",
            "Museums",
            at(55.7415, 37.6208),
        )
        .with_image_url("https://example.com/tretyakov.jpg")
        .with_rating(4.7),
    ]
}

/// Account created when the user table is empty.
#[must_use]
pub fn default_user() -> NewUser {
    NewUser::new("user@example.com", "password", "User")
}
