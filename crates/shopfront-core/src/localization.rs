//! # Localization
//!
//! Maps [`ErrorKey`]s to display text. The validator never produces text
//! itself; whatever renders the form picks a [`Localizer`].
//!
//! ```rust
//! use shopfront_core::{CatalogLocalizer, ErrorKey, Locale, Localizer};
//!
//! let fr = CatalogLocalizer::new(Locale::from_culture("fr-FR"));
//! assert_eq!(fr.lookup(ErrorKey::MissingName), "Veuillez saisir un nom");
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::validation::ErrorKey;

/// Turns an error key into display text.
pub trait Localizer: Send + Sync {
    fn lookup(&self, key: ErrorKey) -> Cow<'static, str>;

    /// Looks up every key, preserving order.
    fn lookup_all(&self, keys: &[ErrorKey]) -> Vec<Cow<'static, str>> {
        keys.iter().map(|key| self.lookup(*key)).collect()
    }
}

/// Locales with a bundled message table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
}

impl Locale {
    /// Resolves a culture name such as `"fr"` or `"es-ES"`.
    ///
    /// Unknown cultures fall back to English.
    pub fn from_culture(culture: &str) -> Self {
        let language = culture
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match language.as_str() {
            "fr" => Locale::Fr,
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }
}

/// The bundled message tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLocalizer {
    locale: Locale,
}

impl CatalogLocalizer {
    pub fn new(locale: Locale) -> Self {
        CatalogLocalizer { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Localizer for CatalogLocalizer {
    fn lookup(&self, key: ErrorKey) -> Cow<'static, str> {
        Cow::Borrowed(match self.locale {
            Locale::En => english(key),
            Locale::Fr => french(key),
            Locale::Es => spanish(key),
        })
    }
}

fn english(key: ErrorKey) -> &'static str {
    match key {
        ErrorKey::MissingName => "Please enter a name",
        ErrorKey::NameIllegalCharacter => "The name contains invalid characters",
        ErrorKey::NameTooShort => "The name must be longer than 3 characters",
        ErrorKey::NameTooLong => "The name must be at most 100 characters",
        ErrorKey::MissingPrice => "Please enter a price",
        ErrorKey::PriceNotANumber => "The value entered for the price must be a number",
        ErrorKey::PriceNotGreaterThanZero => "The price must be greater than zero",
        ErrorKey::MissingStock => "Please enter a stock value",
        ErrorKey::StockNotAnInteger => "The value entered for the stock must be an integer",
        ErrorKey::StockNotGreaterThanZero => "The stock must be greater than zero",
        ErrorKey::MissingDetails => "Please enter details",
        ErrorKey::DetailsIllegalCharacter => "The details contain invalid characters",
        ErrorKey::DetailsTooShort => "The details must be at least 10 characters",
        ErrorKey::DetailsTooLong => "The details must be at most 200 characters",
        ErrorKey::MissingDescription => "Please enter a description",
        ErrorKey::DescriptionIllegalCharacter => "The description contains invalid characters",
        ErrorKey::DescriptionTooShort => "The description must be at least 10 characters",
        ErrorKey::DescriptionTooLong => "The description must be at most 100 characters",
        ErrorKey::MissingOrderName => "Please enter your name",
        ErrorKey::MissingAddress => "Please enter your address",
        ErrorKey::MissingCity => "Please enter your city",
        ErrorKey::MissingZip => "Please enter your zip code",
        ErrorKey::MissingCountry => "Please enter your country",
    }
}

fn french(key: ErrorKey) -> &'static str {
    match key {
        ErrorKey::MissingName => "Veuillez saisir un nom",
        ErrorKey::NameIllegalCharacter => "Le nom contient des caractères invalides",
        ErrorKey::NameTooShort => "Le nom doit comporter plus de 3 caractères",
        ErrorKey::NameTooLong => "Le nom doit comporter au plus 100 caractères",
        ErrorKey::MissingPrice => "Veuillez saisir un prix",
        ErrorKey::PriceNotANumber => "La valeur saisie pour le prix doit être un nombre",
        ErrorKey::PriceNotGreaterThanZero => "Le prix doit être supérieur à zéro",
        ErrorKey::MissingStock => "Veuillez saisir une quantité",
        ErrorKey::StockNotAnInteger => "La valeur saisie pour la quantité doit être un entier",
        ErrorKey::StockNotGreaterThanZero => "La quantité doit être supérieure à zéro",
        ErrorKey::MissingDetails => "Veuillez saisir des détails",
        ErrorKey::DetailsIllegalCharacter => "Les détails contiennent des caractères invalides",
        ErrorKey::DetailsTooShort => "Les détails doivent comporter au moins 10 caractères",
        ErrorKey::DetailsTooLong => "Les détails doivent comporter au plus 200 caractères",
        ErrorKey::MissingDescription => "Veuillez saisir une description",
        ErrorKey::DescriptionIllegalCharacter => {
            "La description contient des caractères invalides"
        }
        ErrorKey::DescriptionTooShort => "La description doit comporter au moins 10 caractères",
        ErrorKey::DescriptionTooLong => "La description doit comporter au plus 100 caractères",
        ErrorKey::MissingOrderName => "Veuillez saisir votre nom",
        ErrorKey::MissingAddress => "Veuillez saisir votre adresse",
        ErrorKey::MissingCity => "Veuillez saisir votre ville",
        ErrorKey::MissingZip => "Veuillez saisir votre code postal",
        ErrorKey::MissingCountry => "Veuillez saisir votre pays",
    }
}

fn spanish(key: ErrorKey) -> &'static str {
    match key {
        ErrorKey::MissingName => "Por favor, introduzca un nombre",
        ErrorKey::NameIllegalCharacter => "El nombre contiene caracteres no válidos",
        ErrorKey::NameTooShort => "El nombre debe tener más de 3 caracteres",
        ErrorKey::NameTooLong => "El nombre debe tener como máximo 100 caracteres",
        ErrorKey::MissingPrice => "Por favor, introduzca un precio",
        ErrorKey::PriceNotANumber => "El valor introducido para el precio debe ser un número",
        ErrorKey::PriceNotGreaterThanZero => "El precio debe ser mayor que cero",
        ErrorKey::MissingStock => "Por favor, introduzca el stock",
        ErrorKey::StockNotAnInteger => "El valor introducido para el stock debe ser un entero",
        ErrorKey::StockNotGreaterThanZero => "El stock debe ser mayor que cero",
        ErrorKey::MissingDetails => "Por favor, introduzca los detalles",
        ErrorKey::DetailsIllegalCharacter => "Los detalles contienen caracteres no válidos",
        ErrorKey::DetailsTooShort => "Los detalles deben tener al menos 10 caracteres",
        ErrorKey::DetailsTooLong => "Los detalles deben tener como máximo 200 caracteres",
        ErrorKey::MissingDescription => "Por favor, introduzca una descripción",
        ErrorKey::DescriptionIllegalCharacter => {
            "La descripción contiene caracteres no válidos"
        }
        ErrorKey::DescriptionTooShort => "La descripción debe tener al menos 10 caracteres",
        ErrorKey::DescriptionTooLong => "La descripción debe tener como máximo 100 caracteres",
        ErrorKey::MissingOrderName => "Por favor, introduzca su nombre",
        ErrorKey::MissingAddress => "Por favor, introduzca su dirección",
        ErrorKey::MissingCity => "Por favor, introduzca su ciudad",
        ErrorKey::MissingZip => "Por favor, introduzca su código postal",
        ErrorKey::MissingCountry => "Por favor, introduzca su país",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_culture() {
        assert_eq!(Locale::from_culture("fr"), Locale::Fr);
        assert_eq!(Locale::from_culture("fr-FR"), Locale::Fr);
        assert_eq!(Locale::from_culture("ES_es"), Locale::Es);
        assert_eq!(Locale::from_culture("en-US"), Locale::En);
        assert_eq!(Locale::from_culture("de"), Locale::En);
        assert_eq!(Locale::from_culture(""), Locale::En);
    }

    #[test]
    fn test_lookup_all_preserves_order() {
        let en = CatalogLocalizer::default();
        let text = en.lookup_all(&[ErrorKey::MissingPrice, ErrorKey::MissingName]);
        assert_eq!(text, vec!["Please enter a price", "Please enter a name"]);
    }

    #[test]
    fn test_every_locale_has_distinct_text() {
        let en = CatalogLocalizer::new(Locale::En);
        let es = CatalogLocalizer::new(Locale::Es);
        assert_ne!(
            en.lookup(ErrorKey::StockNotAnInteger),
            es.lookup(ErrorKey::StockNotAnInteger)
        );
    }
}
