use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::SelectItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub iso_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nationality {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub name_arb: Option<String>,
}

/// External fetch contract for option lists. An empty vector is a valid
/// "no data" result, not an error.
pub trait ReferenceSource {
    fn countries(&self) -> Result<Vec<Country>>;
    fn cities_by_country(&self, country_id: i64) -> Result<Vec<City>>;
    fn nationalities(&self) -> Result<Vec<Nationality>>;
}

/// Session-scoped cache over a [`ReferenceSource`]. Created explicitly by
/// the host (no hidden singleton) and kept for the session: entries are
/// fetched on first need and never individually invalidated. A failed
/// fetch propagates to the caller but leaves previously cached data
/// intact.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    countries: Option<Vec<Country>>,
    nationalities: Option<Vec<Nationality>>,
    cities: HashMap<i64, Vec<City>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countries(&mut self, source: &dyn ReferenceSource) -> Result<&[Country]> {
        if self.countries.is_none() {
            self.countries = Some(source.countries()?);
        }
        Ok(self.countries.as_deref().unwrap_or_default())
    }

    pub fn nationalities(&mut self, source: &dyn ReferenceSource) -> Result<&[Nationality]> {
        if self.nationalities.is_none() {
            self.nationalities = Some(source.nationalities()?);
        }
        Ok(self.nationalities.as_deref().unwrap_or_default())
    }

    pub fn cities(&mut self, source: &dyn ReferenceSource, country_id: i64) -> Result<&[City]> {
        if !self.cities.contains_key(&country_id) {
            let fetched = source.cities_by_country(country_id)?;
            self.cities.insert(country_id, fetched);
        }
        Ok(self
            .cities
            .get(&country_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    pub fn country_options(&mut self, source: &dyn ReferenceSource) -> Result<Vec<SelectItem>> {
        Ok(self
            .countries(source)?
            .iter()
            .map(|country| SelectItem::new(country.id.to_string(), country.name.clone()))
            .collect())
    }

    pub fn city_options(
        &mut self,
        source: &dyn ReferenceSource,
        country_id: i64,
    ) -> Result<Vec<SelectItem>> {
        Ok(self
            .cities(source, country_id)?
            .iter()
            .map(|city| SelectItem::new(city.id.to_string(), city.name.clone()))
            .collect())
    }

    /// Option list for nationalities, preferring the Arabic display name
    /// when requested and available.
    pub fn nationality_options(
        &mut self,
        source: &dyn ReferenceSource,
        prefer_arabic: bool,
    ) -> Result<Vec<SelectItem>> {
        Ok(self
            .nationalities(source)?
            .iter()
            .map(|nationality| {
                let label = if prefer_arabic {
                    nationality
                        .name_arb
                        .clone()
                        .unwrap_or_else(|| nationality.name.clone())
                } else {
                    nationality.name.clone()
                };
                SelectItem::new(nationality.id.to_string(), label)
            })
            .collect())
    }
}
