//! Operator submissions collected by the submission dialog.

use thiserror::Error;

use crate::{Category, Coordinates, PointOfInterest};

/// Suffix appended to operator-entered titles.
pub const USER_SUBMITTED_SUFFIX: &str = " (User Submitted)";

/// Completed form returned by the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Title typed by the operator.
    pub title: String,
    /// Description typed by the operator.
    pub description: String,
    /// Selected entry of the category picker: `0` is a hazard, anything
    /// else reports people.
    pub category_index: usize,
}

/// Errors returned by [`Submission::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Title was empty after trimming.
    #[error("submission title must not be blank")]
    BlankTitle,
    /// Description was empty after trimming.
    #[error("submission description must not be blank")]
    BlankDescription,
}

impl Submission {
    /// Bundle the dialog fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category_index: usize,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category_index,
        }
    }

    /// Category chosen in the picker.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self.category_index {
            0 => Category::Hazard,
            _ => Category::People,
        }
    }

    /// Check both text fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns the first blank field.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.title.trim().is_empty() {
            return Err(SubmissionError::BlankTitle);
        }
        if self.description.trim().is_empty() {
            return Err(SubmissionError::BlankDescription);
        }
        Ok(())
    }

    /// Turn the submission into a user-submitted record at `coordinates`.
    ///
    /// # Errors
    ///
    /// Fails when [`Submission::validate`] does.
    ///
    /// # Examples
    /// ```
    /// use firepath_core::{Category, Coordinates, Submission};
    ///
    /// let poi = Submission::new("Fire", "Kitchen", 0)
    ///     .into_point(Coordinates::new(42.98, -81.24))?;
    /// assert_eq!(poi.title, "Fire (User Submitted)");
    /// assert_eq!(poi.category, Category::Hazard);
    /// assert!(poi.user_submitted);
    /// # Ok::<(), firepath_core::SubmissionError>(())
    /// ```
    pub fn into_point(self, coordinates: Coordinates) -> Result<PointOfInterest, SubmissionError> {
        self.validate()?;
        let category = self.category();
        let title = format!("{}{USER_SUBMITTED_SUFFIX}", self.title);
        Ok(PointOfInterest::new(category, title, self.description, coordinates).with_user_submitted(true))
    }
}
