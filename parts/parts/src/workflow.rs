//! Sequencing for adding a new part.
//!
//! ```text
//! Editing -> validate -> Rejected                                      (fix input, validate again)
//!                     -> ConfirmingNewManufacturer -> confirm -> Committing -> commit -> Committed
//!                                                  -> decline -> Rejected
//!                     -> Committing -> commit -> Committed
//! ```
//!
//! Nothing is written until validation has passed. Confirming a new manufacturer writes exactly one manufacturer,
//! committing writes exactly one part. Repository failures are returned as-is and never retried.

use std::fmt::{Display, Formatter};

use tracing::{debug, info};

use crate::error::{NotFoundError, PartsError, ValidationError};
use crate::manufacturer::{next_manufacturer_id, KnownManufacturers, ManufacturerId};
use crate::part::NewPart;
use crate::repository::PartsRepository;
use crate::validation::{validate_new_part, ManufacturerNameCheck};

/// Answers whether an unrecognised manufacturer should be created.
pub trait Confirmation {
    fn confirm_new_manufacturer(&mut self, name: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm_new_manufacturer(&mut self, name: &str) -> bool {
        self(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Editing,
    Rejected(Rejection),
    ConfirmingNewManufacturer { name: String },
    Committing,
    Committed(CommittedPart),
}

impl WorkflowState {
    pub fn kind(&self) -> WorkflowStateKind {
        match self {
            WorkflowState::Editing => WorkflowStateKind::Editing,
            WorkflowState::Rejected(_) => WorkflowStateKind::Rejected,
            WorkflowState::ConfirmingNewManufacturer {
                ..
            } => WorkflowStateKind::ConfirmingNewManufacturer,
            WorkflowState::Committing => WorkflowStateKind::Committing,
            WorkflowState::Committed(_) => WorkflowStateKind::Committed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStateKind {
    Editing,
    Rejected,
    ConfirmingNewManufacturer,
    Committing,
    Committed,
}

impl Display for WorkflowStateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStateKind::Editing => f.write_str("editing"),
            WorkflowStateKind::Rejected => f.write_str("rejected"),
            WorkflowStateKind::ConfirmingNewManufacturer => f.write_str("confirming new manufacturer"),
            WorkflowStateKind::Committing => f.write_str("committing"),
            WorkflowStateKind::Committed => f.write_str("committed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Invalid(ValidationError),
    ManufacturerDeclined(String),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Invalid(error) => write!(f, "{}", error),
            Rejection::ManufacturerDeclined(name) => write!(f, "New manufacturer declined. name: '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedPart {
    pub part: NewPart,
    pub manufacturer_id: String,
    /// Set when a manufacturer was created for the part.
    pub new_manufacturer_id: Option<ManufacturerId>,
}

#[derive(Debug)]
pub struct NewPartWorkflow {
    known: KnownManufacturers,
    state: WorkflowState,
    pending: Option<NewPart>,
    new_manufacturer_id: Option<ManufacturerId>,
}

impl NewPartWorkflow {
    pub fn new(known: KnownManufacturers) -> Self {
        Self {
            known,
            state: WorkflowState::Editing,
            pending: None,
            new_manufacturer_id: None,
        }
    }

    /// Starts a workflow with the manufacturers currently in the repository.
    pub fn load(repository: &impl PartsRepository) -> Result<Self, PartsError> {
        let names = repository.list_manufacturer_names()?;
        Ok(Self::new(KnownManufacturers::from(names)))
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn known_manufacturers(&self) -> &KnownManufacturers {
        &self.known
    }

    pub fn into_known_manufacturers(self) -> KnownManufacturers {
        self.known
    }

    fn expect_state(&self, expected: WorkflowStateKind) -> Result<(), PartsError> {
        let actual = self.state.kind();
        if actual != expected {
            return Err(PartsError::InvalidState {
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn unconfirmed_manufacturer(&self) -> Result<String, PartsError> {
        match &self.state {
            WorkflowState::ConfirmingNewManufacturer {
                name,
            } => Ok(name.clone()),
            state => Err(PartsError::InvalidState {
                expected: WorkflowStateKind::ConfirmingNewManufacturer,
                actual: state.kind(),
            }),
        }
    }

    /// Validates all the fields of `part`.
    ///
    /// Allowed while editing, or after a rejection so corrected input can be validated again.
    pub fn validate(&mut self, part: NewPart) -> Result<&WorkflowState, PartsError> {
        if !matches!(self.state, WorkflowState::Editing | WorkflowState::Rejected(_)) {
            self.expect_state(WorkflowStateKind::Editing)?;
        }

        self.new_manufacturer_id = None;

        self.state = match validate_new_part(&part, &self.known) {
            Err(error) => {
                debug!("Rejected new part. reason: {}", error);
                WorkflowState::Rejected(Rejection::Invalid(error))
            }
            Ok(ManufacturerNameCheck::Known) => WorkflowState::Committing,
            Ok(ManufacturerNameCheck::ConfirmationRequired) => {
                debug!("Unknown manufacturer, confirmation required. name: '{}'", part.manufacturer);
                WorkflowState::ConfirmingNewManufacturer {
                    name: part.manufacturer.clone(),
                }
            }
        };
        self.pending = Some(part);

        Ok(&self.state)
    }

    /// Allocates an id for the unrecognised manufacturer and adds it to the repository and the known manufacturers.
    pub fn confirm_new_manufacturer(&mut self, repository: &mut impl PartsRepository) -> Result<ManufacturerId, PartsError> {
        let name = self.unconfirmed_manufacturer()?;

        let last_manufacturer_id = repository.last_manufacturer_id()?;
        let manufacturer_id = next_manufacturer_id(last_manufacturer_id.as_deref())?;

        repository.add_manufacturer(&name, &manufacturer_id.to_string())?;
        info!("Added manufacturer. name: '{}', manufacturer_id: {}", name, manufacturer_id);

        self.known.push(name);
        self.new_manufacturer_id = Some(manufacturer_id);
        self.state = WorkflowState::Committing;

        Ok(manufacturer_id)
    }

    /// Rejects the part, nothing is written.
    pub fn decline_new_manufacturer(&mut self) -> Result<&WorkflowState, PartsError> {
        let name = self.unconfirmed_manufacturer()?;

        info!("New manufacturer declined, part not added. name: '{}'", name);
        self.state = WorkflowState::Rejected(Rejection::ManufacturerDeclined(name));

        Ok(&self.state)
    }

    /// Adds the validated part to the repository.
    ///
    /// Fails with [`NotFoundError::Manufacturer`] if the manufacturer is no longer in the repository.
    pub fn commit(&mut self, repository: &mut impl PartsRepository) -> Result<CommittedPart, PartsError> {
        let part = match (&self.state, &self.pending) {
            (WorkflowState::Committing, Some(part)) => part.clone(),
            (state, _) => {
                return Err(PartsError::InvalidState {
                    expected: WorkflowStateKind::Committing,
                    actual: state.kind(),
                })
            }
        };

        let manufacturer = repository
            .lookup_manufacturer_by_name(&part.manufacturer)?
            .ok_or_else(|| NotFoundError::Manufacturer(part.manufacturer.clone()))?;

        repository.add_part(
            &part.part_number,
            &part.description,
            &manufacturer.manufacturer_id,
            &part.mpn,
        )?;
        info!(
            "Added part. part_number: {}, manufacturer: '{}', mpn: '{}'",
            part.part_number, part.manufacturer, part.mpn
        );

        let committed = CommittedPart {
            part,
            manufacturer_id: manufacturer.manufacturer_id,
            new_manufacturer_id: self.new_manufacturer_id,
        };
        self.pending = None;
        self.state = WorkflowState::Committed(committed.clone());

        Ok(committed)
    }

    /// Runs the whole sequence for `part`, asking `confirmation` if the manufacturer is unrecognised.
    ///
    /// Ends in either [`WorkflowState::Rejected`] or [`WorkflowState::Committed`].
    pub fn run(
        &mut self,
        repository: &mut impl PartsRepository,
        part: NewPart,
        confirmation: &mut impl Confirmation,
    ) -> Result<&WorkflowState, PartsError> {
        self.validate(part)?;
        let name = match &self.state {
            WorkflowState::Rejected(_) => return Ok(&self.state),
            WorkflowState::ConfirmingNewManufacturer {
                name,
            } => Some(name.clone()),
            _ => None,
        };

        if let Some(name) = name {
            if !confirmation.confirm_new_manufacturer(&name) {
                return self.decline_new_manufacturer();
            }
            self.confirm_new_manufacturer(repository)?;
        }

        self.commit(repository)?;

        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::memory::{InMemoryPartsRepository, RepositoryWrite};
    use crate::validation::Field;

    fn acme_part() -> NewPart {
        NewPart::new("800001-101", "Resistor 10k", "Acme", "ACM-10K")
    }

    fn repository() -> InMemoryPartsRepository {
        InMemoryPartsRepository::default()
            .with_manufacturer("Default", "M0000000")
            .with_manufacturer("Yageo", "M0000001")
            .with_part("800000-101", "Capacitor 100n", "M0000001", "CC0402")
    }

    #[test]
    fn unknown_manufacturer_requires_confirmation() {
        // given
        let repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();

        // when
        let state = workflow.validate(acme_part()).unwrap();

        // then
        assert_eq!(state, &WorkflowState::ConfirmingNewManufacturer {
            name: "Acme".to_string(),
        });
        assert!(repository.writes().is_empty());
    }

    #[test]
    fn declined_manufacturer_writes_nothing() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();

        // when
        let state = workflow
            .run(&mut repository, acme_part(), &mut |_name: &str| false)
            .unwrap();

        // then
        assert_eq!(
            state,
            &WorkflowState::Rejected(Rejection::ManufacturerDeclined("Acme".to_string()))
        );
        assert!(repository.writes().is_empty());
        assert!(!workflow
            .known_manufacturers()
            .contains("Acme"));
    }

    #[test]
    fn confirmed_manufacturer_is_added_before_the_part() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();
        let mut asked = vec![];

        // when
        let state = workflow
            .run(&mut repository, acme_part(), &mut |name: &str| {
                asked.push(name.to_string());
                true
            })
            .unwrap()
            .clone();

        // then
        assert_eq!(asked, ["Acme"]);
        assert_eq!(repository.writes(), [
            RepositoryWrite::AddManufacturer {
                name: "Acme".to_string(),
                manufacturer_id: "M0000002".to_string(),
            },
            RepositoryWrite::AddPart {
                part_number: "800001-101".to_string(),
                description: "Resistor 10k".to_string(),
                manufacturer_id: "M0000002".to_string(),
                mpn: "ACM-10K".to_string(),
            },
        ]);
        assert_eq!(
            state,
            WorkflowState::Committed(CommittedPart {
                part: acme_part(),
                manufacturer_id: "M0000002".to_string(),
                new_manufacturer_id: Some("M0000002".parse().unwrap()),
            })
        );

        // and the known manufacturers are kept in step with the repository
        let known = workflow.into_known_manufacturers();
        assert_eq!(known.names(), ["Default", "Yageo", "Acme"]);
    }

    #[test]
    fn first_manufacturer_gets_the_first_id() {
        // given
        let mut repository = InMemoryPartsRepository::default();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();
        workflow.validate(acme_part()).unwrap();

        // when
        let manufacturer_id = workflow
            .confirm_new_manufacturer(&mut repository)
            .unwrap();

        // then
        assert_eq!(manufacturer_id.to_string(), "M0000000");
        assert_eq!(workflow.state(), &WorkflowState::Committing);
    }

    #[test]
    fn known_manufacturer_is_committed_without_confirmation() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();
        let part = NewPart::new("800001-101", "Resistor 10k", "Yageo", "RC0402FR-0710KL");

        // when
        workflow
            .run(&mut repository, part, &mut |_name: &str| -> bool { panic!("unexpected confirmation") })
            .unwrap();

        // then
        assert_eq!(repository.writes(), [RepositoryWrite::AddPart {
            part_number: "800001-101".to_string(),
            description: "Resistor 10k".to_string(),
            manufacturer_id: "M0000001".to_string(),
            mpn: "RC0402FR-0710KL".to_string(),
        }]);
        assert_eq!(workflow.state().kind(), WorkflowStateKind::Committed);
    }

    #[test]
    fn invalid_input_is_rejected_then_corrected() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();
        let invalid = NewPart::new("800001-101", "Res", "Yageo", "RC0402");

        // when
        let state = workflow
            .validate(invalid)
            .unwrap()
            .clone();

        // then
        let WorkflowState::Rejected(Rejection::Invalid(error)) = state else {
            panic!("expected rejection, state: {:?}", state);
        };
        assert_eq!(error.field, Field::Description);
        assert!(repository.writes().is_empty());

        // and validation can be repeated with corrected input
        let corrected = NewPart::new("800001-101", "Resistor", "Yageo", "RC0402");
        assert_eq!(workflow.validate(corrected).unwrap(), &WorkflowState::Committing);
        workflow.commit(&mut repository).unwrap();
        assert_eq!(repository.writes().len(), 1);
    }

    #[test]
    fn commit_fails_when_manufacturer_has_vanished() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::new(KnownManufacturers::from(vec!["Gone".to_string()]));
        workflow
            .validate(NewPart::new("800001-101", "Resistor 10k", "Gone", "G-1"))
            .unwrap();

        // when
        let result = workflow.commit(&mut repository);

        // then
        assert!(matches!(
            result,
            Err(PartsError::NotFound(NotFoundError::Manufacturer(name))) if name == "Gone"
        ));
        assert!(repository.writes().is_empty());
    }

    #[test]
    fn repository_errors_are_returned_unchanged() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();
        let duplicate = NewPart::new("800000-101", "Capacitor 100n", "Yageo", "CC0402");

        // when
        let result = workflow.run(&mut repository, duplicate, &mut |_name: &str| true);

        // then
        assert!(matches!(
            result,
            Err(PartsError::Repository(RepositoryError::Duplicate { kind: "part", .. }))
        ));
        assert!(repository.writes().is_empty());
    }

    #[test]
    fn out_of_order_calls_are_refused() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();

        // expect
        assert!(matches!(workflow.commit(&mut repository), Err(PartsError::InvalidState {
            expected: WorkflowStateKind::Committing,
            actual: WorkflowStateKind::Editing,
        })));
        assert!(matches!(
            workflow.confirm_new_manufacturer(&mut repository),
            Err(PartsError::InvalidState { .. })
        ));
        assert!(matches!(workflow.decline_new_manufacturer(), Err(PartsError::InvalidState { .. })));
    }

    #[test]
    fn committed_part_cannot_be_committed_again() {
        // given
        let mut repository = repository();
        let mut workflow = NewPartWorkflow::load(&repository).unwrap();
        workflow
            .validate(NewPart::new("800001-101", "Resistor 10k", "Yageo", "RC0402"))
            .unwrap();
        let committed = workflow.commit(&mut repository).unwrap();
        assert_eq!(committed.manufacturer_id, "M0000001");
        assert_eq!(workflow.state(), &WorkflowState::Committed(committed));

        // when
        let result = workflow.commit(&mut repository);

        // then
        assert!(matches!(result, Err(PartsError::InvalidState {
            expected: WorkflowStateKind::Committing,
            actual: WorkflowStateKind::Committed,
        })));
        assert_eq!(repository.writes().len(), 1);
    }
}
