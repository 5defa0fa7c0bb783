use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// A car record identified by its license plate.
///
/// The plate is mandatory and never empty; every other attribute is optional.
/// Plates are unique by convention only and compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Car {
    license_plate: String,
    make: Option<String>,
    model: Option<String>,
    color: Option<String>,
    owner_name: Option<String>,
}

impl Car {
    /// Creates a car with the given plate and no other attributes.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyLicensePlate`] if `license_plate` is blank.
    pub fn new(license_plate: impl Into<String>) -> Result<Self, CoreError> {
        Ok(Self {
            license_plate: checked_plate(license_plate.into())?,
            make: None,
            model: None,
            color: None,
            owner_name: None,
        })
    }

    /// Sets the make, builder style.
    #[must_use]
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Sets the model, builder style.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the color, builder style.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the owner name, builder style.
    #[must_use]
    pub fn with_owner(mut self, owner_name: impl Into<String>) -> Self {
        self.owner_name = Some(owner_name.into());
        self
    }

    #[must_use]
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    #[must_use]
    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    /// Replaces the license plate.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyLicensePlate`] if `license_plate` is blank;
    /// the previous plate is kept in that case.
    pub fn set_license_plate(&mut self, license_plate: impl Into<String>) -> Result<(), CoreError> {
        self.license_plate = checked_plate(license_plate.into())?;
        Ok(())
    }

    pub fn set_make(&mut self, make: Option<String>) {
        self.make = make;
    }

    pub fn set_model(&mut self, model: Option<String>) {
        self.model = model;
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub fn set_owner_name(&mut self, owner_name: Option<String>) {
        self.owner_name = owner_name;
    }

    /// Case-insensitive plate comparison.
    #[must_use]
    pub fn has_plate(&self, plate: &str) -> bool {
        eq_ignore_case(&self.license_plate, plate)
    }

    /// Case-insensitive model comparison. A car without a model never matches.
    #[must_use]
    pub fn has_model(&self, model: &str) -> bool {
        self.model.as_deref().is_some_and(|m| eq_ignore_case(m, model))
    }

    /// Case-insensitive owner comparison. A car without an owner never matches.
    #[must_use]
    pub fn has_owner(&self, owner_name: &str) -> bool {
        self.owner_name
            .as_deref()
            .is_some_and(|o| eq_ignore_case(o, owner_name))
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: &Option<String>| v.as_deref().unwrap_or("-").to_owned();
        write!(
            f,
            "Car{{plate={}, make={}, model={}, color={}, owner={}}}",
            self.license_plate,
            field(&self.make),
            field(&self.model),
            field(&self.color),
            field(&self.owner_name),
        )
    }
}

fn checked_plate(plate: String) -> Result<String, CoreError> {
    if plate.trim().is_empty() {
        return Err(CoreError::EmptyLicensePlate);
    }
    Ok(plate)
}

/// Unicode-aware case-insensitive equality.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
