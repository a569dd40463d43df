use anyhow::Result;
use serde_json::Value;

use crate::domain::{FieldPath, SelectItem};
use crate::form::{FormState, SetOptions};
use crate::refdata::{ReferenceCache, ReferenceSource};

/// Country dropdown fed from the reference cache. Selecting a country
/// yields its numeric id for wiring into a [`CityCascade`].
pub struct CountrySelect {
    field: FieldPath,
    options: Vec<SelectItem>,
}

impl CountrySelect {
    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            options: Vec::new(),
        }
    }

    pub fn load(
        &mut self,
        cache: &mut ReferenceCache,
        source: &dyn ReferenceSource,
    ) -> Result<()> {
        self.options = cache.country_options(source)?;
        Ok(())
    }

    pub fn options(&self) -> &[SelectItem] {
        &self.options
    }

    pub fn select(&self, form: &mut FormState, value: &str) -> Option<i64> {
        let item = self.options.iter().find(|item| item.value == value)?.clone();
        let id = item.value.parse::<i64>().ok();
        form.set_value(
            &self.field,
            serde_json::to_value(&item).unwrap_or(Value::Null),
            SetOptions::default(),
        );
        id
    }
}

/// Correlates one in-flight city fetch with the country that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityRequest {
    seq: u64,
    pub country_id: i64,
}

/// City dropdown whose option list depends on the currently selected
/// country. Responses are applied only when they belong to the latest
/// request for the still-selected country, so a slow fetch for a
/// previously selected country can never overwrite newer options.
pub struct CityCascade {
    field: FieldPath,
    options: Vec<SelectItem>,
    selected_country: Option<i64>,
    next_seq: u64,
    pending_seq: Option<u64>,
}

impl CityCascade {
    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            options: Vec::new(),
            selected_country: None,
            next_seq: 0,
            pending_seq: None,
        }
    }

    pub fn options(&self) -> &[SelectItem] {
        &self.options
    }

    pub fn selected_country(&self) -> Option<i64> {
        self.selected_country
    }

    /// Records the new parent country: drops the now-stale options, resets
    /// the bound city field, and hands back a correlated request for the
    /// caller to resolve against the reference data. `None` country means
    /// no request and an empty list.
    pub fn country_changed(
        &mut self,
        form: &mut FormState,
        country_id: Option<i64>,
    ) -> Option<CityRequest> {
        self.selected_country = country_id;
        self.options.clear();
        self.pending_seq = None;
        form.set_value(&self.field, Value::Null, SetOptions::default());
        let country_id = country_id?;
        self.next_seq += 1;
        self.pending_seq = Some(self.next_seq);
        Some(CityRequest {
            seq: self.next_seq,
            country_id,
        })
    }

    /// Applies a resolved fetch. Stale responses, or responses for a
    /// country that is no longer selected, are discarded.
    pub fn apply(&mut self, request: CityRequest, cities: Vec<SelectItem>) -> bool {
        if self.pending_seq != Some(request.seq)
            || self.selected_country != Some(request.country_id)
        {
            tracing::debug!(
                country_id = request.country_id,
                "discarding stale city response"
            );
            return false;
        }
        self.options = cities;
        self.pending_seq = None;
        true
    }

    /// Convenience path for a synchronously available source: issue the
    /// request and resolve it through the cache in one go.
    pub fn refresh(
        &mut self,
        form: &mut FormState,
        cache: &mut ReferenceCache,
        source: &dyn ReferenceSource,
        country_id: Option<i64>,
    ) -> Result<()> {
        if let Some(request) = self.country_changed(form, country_id) {
            let options = cache.city_options(source, request.country_id)?;
            self.apply(request, options);
        }
        Ok(())
    }

    pub fn select(&self, form: &mut FormState, value: &str) {
        let Some(item) = self.options.iter().find(|item| item.value == value).cloned() else {
            tracing::debug!(value, "city selection does not match any option");
            return;
        };
        form.set_value(
            &self.field,
            serde_json::to_value(&item).unwrap_or(Value::Null),
            SetOptions::default(),
        );
    }
}

/// Nationality dropdown fed from the cached nationality list.
pub struct NationalitySelect {
    field: FieldPath,
    options: Vec<SelectItem>,
    prefer_arabic: bool,
}

impl NationalitySelect {
    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            options: Vec::new(),
            prefer_arabic: false,
        }
    }

    pub fn prefer_arabic(mut self) -> Self {
        self.prefer_arabic = true;
        self
    }

    pub fn load(
        &mut self,
        cache: &mut ReferenceCache,
        source: &dyn ReferenceSource,
    ) -> Result<()> {
        self.options = cache.nationality_options(source, self.prefer_arabic)?;
        Ok(())
    }

    pub fn options(&self) -> &[SelectItem] {
        &self.options
    }

    pub fn select(&self, form: &mut FormState, value: &str) {
        let Some(item) = self.options.iter().find(|item| item.value == value).cloned() else {
            return;
        };
        form.set_value(
            &self.field,
            serde_json::to_value(&item).unwrap_or(Value::Null),
            SetOptions::default(),
        );
    }
}
