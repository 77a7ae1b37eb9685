//! # Forms
//!
//! `key=value` arguments turned into typed request bodies. Each builder
//! consumes the keys it knows and rejects anything left over, so a typo is
//! an error rather than a silently dropped field.

use crate::core::error::{AppError, Result};
use chrono::{NaiveDate, NaiveTime};
use shared::{
    AppointmentCreate, AppointmentStatus, AppointmentUpdate, DepartmentCreate,
    MedicalRecordCreate, MedicalRecordUpdate, PatientCreate, PatientUpdate, UserCreate, UserUpdate,
};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Default visit length when the form does not set one
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: BTreeMap<String, String>,
}

impl FormFields {
    /// Parse `key=value` pairs. Empty values count as absent.
    pub fn parse<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut fields = BTreeMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(AppError::InvalidInput(format!(
                    "expected key=value, got '{}'",
                    pair
                )));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(AppError::InvalidInput(format!("missing field name in '{}'", pair)));
            }
            let value = value.trim();
            if !value.is_empty() {
                fields.insert(key.to_string(), value.to_string());
            }
        }
        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn text(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn required_text(&mut self, key: &str) -> Result<String> {
        self.text(key)
            .ok_or_else(|| AppError::InvalidInput(format!("'{}' is required", key)))
    }

    pub fn parsed<T: FromStr>(&mut self, key: &str) -> Result<Option<T>> {
        match self.fields.remove(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                AppError::InvalidInput(format!("'{}' has an invalid value '{}'", key, raw))
            }),
        }
    }

    pub fn required<T: FromStr>(&mut self, key: &str) -> Result<T> {
        self.parsed(key)?
            .ok_or_else(|| AppError::InvalidInput(format!("'{}' is required", key)))
    }

    pub fn date(&mut self, key: &str) -> Result<Option<NaiveDate>> {
        match self.fields.remove(key) {
            None => Ok(None),
            Some(raw) => parse_date(&raw).map(Some),
        }
    }

    pub fn time(&mut self, key: &str) -> Result<Option<NaiveTime>> {
        match self.fields.remove(key) {
            None => Ok(None),
            Some(raw) => parse_time(&raw).map(Some),
        }
    }

    pub fn flag(&mut self, key: &str) -> Result<Option<bool>> {
        match self.fields.remove(key) {
            None => Ok(None),
            Some(raw) => parse_flag(&raw).map(Some),
        }
    }

    /// Fail on keys nobody consumed
    pub fn finish(self) -> Result<()> {
        if self.fields.is_empty() {
            return Ok(());
        }
        let unknown: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        Err(AppError::InvalidInput(format!(
            "unknown field(s): {}",
            unknown.join(", ")
        )))
    }
}

/// `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a date (YYYY-MM-DD)", raw)))
}

/// `HH:MM` or `HH:MM:SS`
pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a time (HH:MM)", raw)))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(AppError::InvalidInput(format!("'{}' is not true/false", raw))),
    }
}

fn require_changes(fields: &FormFields) -> Result<()> {
    if fields.is_empty() {
        return Err(AppError::InvalidInput("nothing to update".to_string()));
    }
    Ok(())
}

fn missing_date(key: &str) -> AppError {
    AppError::InvalidInput(format!("'{}' is required", key))
}

pub fn patient_create(mut f: FormFields) -> Result<PatientCreate> {
    let patient = PatientCreate {
        first_name: f.required_text("first_name")?,
        last_name: f.required_text("last_name")?,
        middle_name: f.text("middle_name"),
        birth_date: f.date("birth_date")?.ok_or_else(|| missing_date("birth_date"))?,
        gender: f.text("gender"),
        phone: f.required_text("phone")?,
        email: f.text("email"),
        address: f.text("address"),
        insurance_number: f.text("insurance_number"),
        blood_type: f.text("blood_type"),
        allergies: f.text("allergies"),
        chronic_diseases: f.text("chronic_diseases"),
        emergency_contact: f.text("emergency_contact"),
        emergency_phone: f.text("emergency_phone"),
    };
    f.finish()?;
    Ok(patient)
}

pub fn patient_update(mut f: FormFields) -> Result<PatientUpdate> {
    require_changes(&f)?;
    let update = PatientUpdate {
        first_name: f.text("first_name"),
        last_name: f.text("last_name"),
        middle_name: f.text("middle_name"),
        phone: f.text("phone"),
        email: f.text("email"),
        address: f.text("address"),
        blood_type: f.text("blood_type"),
        allergies: f.text("allergies"),
        chronic_diseases: f.text("chronic_diseases"),
        emergency_contact: f.text("emergency_contact"),
        emergency_phone: f.text("emergency_phone"),
        is_active: f.flag("is_active")?,
    };
    f.finish()?;
    Ok(update)
}

pub fn appointment_create(mut f: FormFields) -> Result<AppointmentCreate> {
    let appointment = AppointmentCreate {
        patient_id: f.required("patient_id")?,
        doctor_id: f.required("doctor_id")?,
        department_id: f.parsed("department_id")?,
        appointment_date: f
            .date("appointment_date")?
            .ok_or_else(|| missing_date("appointment_date"))?,
        appointment_time: f
            .time("appointment_time")?
            .ok_or_else(|| missing_date("appointment_time"))?,
        duration_minutes: f
            .parsed("duration_minutes")?
            .unwrap_or(DEFAULT_DURATION_MINUTES),
        reason: f.text("reason"),
        notes: f.text("notes"),
    };
    f.finish()?;
    if appointment.duration_minutes <= 0 {
        return Err(AppError::InvalidInput(
            "'duration_minutes' must be positive".to_string(),
        ));
    }
    Ok(appointment)
}

pub fn appointment_update(mut f: FormFields) -> Result<AppointmentUpdate> {
    require_changes(&f)?;
    let update = AppointmentUpdate {
        appointment_date: f.date("appointment_date")?,
        appointment_time: f.time("appointment_time")?,
        duration_minutes: f.parsed("duration_minutes")?,
        status: f.parsed::<AppointmentStatus>("status")?,
        reason: f.text("reason"),
        notes: f.text("notes"),
    };
    f.finish()?;
    Ok(update)
}

pub fn medical_record_create(mut f: FormFields) -> Result<MedicalRecordCreate> {
    let record = MedicalRecordCreate {
        patient_id: f.required("patient_id")?,
        doctor_id: f.parsed("doctor_id")?,
        appointment_id: f.parsed("appointment_id")?,
        diagnosis: f.required_text("diagnosis")?,
        symptoms: f.text("symptoms"),
        treatment: f.text("treatment"),
        prescriptions: f.text("prescriptions"),
        lab_results: f.text("lab_results"),
        notes: f.text("notes"),
        is_confidential: f.flag("is_confidential")?.unwrap_or(false),
    };
    f.finish()?;
    Ok(record)
}

pub fn medical_record_update(mut f: FormFields) -> Result<MedicalRecordUpdate> {
    require_changes(&f)?;
    let update = MedicalRecordUpdate {
        diagnosis: f.text("diagnosis"),
        symptoms: f.text("symptoms"),
        treatment: f.text("treatment"),
        prescriptions: f.text("prescriptions"),
        lab_results: f.text("lab_results"),
        notes: f.text("notes"),
        is_confidential: f.flag("is_confidential")?,
    };
    f.finish()?;
    Ok(update)
}

/// New account plus the role to link once it exists. The create endpoint
/// takes no role, so `role_id` becomes a follow-up `assign_role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user: UserCreate,
    pub role_id: Option<i64>,
}

pub fn user_create(mut f: FormFields) -> Result<NewUser> {
    let user = UserCreate {
        username: f.required_text("username")?,
        email: f.required_text("email")?,
        full_name: f.required_text("full_name")?,
        phone: f.text("phone"),
        password: f.required_text("password")?,
    };
    let role_id = f.parsed("role_id")?;
    f.finish()?;
    Ok(NewUser { user, role_id })
}

pub fn user_update(mut f: FormFields) -> Result<UserUpdate> {
    require_changes(&f)?;
    let update = UserUpdate {
        email: f.text("email"),
        full_name: f.text("full_name"),
        phone: f.text("phone"),
        is_active: f.flag("is_active")?,
    };
    f.finish()?;
    Ok(update)
}

pub fn department_create(mut f: FormFields) -> Result<DepartmentCreate> {
    let department = DepartmentCreate {
        name: f.required_text("name")?,
        description: f.text("description"),
        phone: f.text("phone"),
        floor: f.parsed("floor")?,
        capacity: f.parsed("capacity")?,
        head_doctor_id: f.parsed("head_doctor_id")?,
    };
    f.finish()?;
    Ok(department)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[&str]) -> FormFields {
        FormFields::parse(pairs).unwrap()
    }

    #[test]
    fn test_patient_create_from_pairs() {
        let patient = patient_create(fields(&[
            "first_name=Іван",
            "last_name=Петренко",
            "birth_date=1985-03-14",
            "phone=+380501112233",
            "blood_type=A+",
        ]))
        .unwrap();
        assert_eq!(patient.first_name, "Іван");
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1985, 3, 14).unwrap());
        assert_eq!(patient.blood_type.as_deref(), Some("A+"));
        assert_eq!(patient.email, None);
    }

    #[test]
    fn test_missing_required_field() {
        let err = patient_create(fields(&["first_name=A", "birth_date=2000-01-01", "phone=1"]))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("last_name")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = department_create(fields(&["name=ER", "flor=2"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("flor")));
    }

    #[test]
    fn test_bad_pair_and_bad_number() {
        assert!(FormFields::parse(&["name"]).is_err());
        assert!(FormFields::parse(&["=x"]).is_err());
        let err = department_create(fields(&["name=ER", "floor=two"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_appointment_create_defaults_duration() {
        let appointment = appointment_create(fields(&[
            "patient_id=1",
            "doctor_id=2",
            "appointment_date=2024-01-02",
            "appointment_time=09:30",
            "reason=Огляд",
        ]))
        .unwrap();
        assert_eq!(appointment.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(appointment.appointment_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_appointment_update_status() {
        let update = appointment_update(fields(&["status=no_show"])).unwrap();
        assert_eq!(update.status, Some(AppointmentStatus::NoShow));
        assert!(appointment_update(fields(&["status=later"])).is_err());
    }

    #[test]
    fn test_empty_update_rejected() {
        assert!(user_update(FormFields::default()).is_err());
        let update = user_update(fields(&["is_active=no"])).unwrap();
        assert_eq!(update.is_active, Some(false));
    }

    #[test]
    fn test_record_confidential_flag() {
        let record = medical_record_create(fields(&["patient_id=4", "diagnosis=Flu"])).unwrap();
        assert!(!record.is_confidential);
        assert_eq!(record.doctor_id, None);
        let record = medical_record_create(fields(&[
            "patient_id=4",
            "diagnosis=Flu",
            "is_confidential=yes",
        ]))
        .unwrap();
        assert!(record.is_confidential);
    }

    #[test]
    fn test_blank_value_counts_as_absent() {
        let user = user_create(fields(&[
            "username=nurse",
            "email=n@clinic.test",
            "full_name=Nurse One",
            "password=secret",
            "phone=",
        ]))
        .unwrap();
        assert_eq!(user.user.phone, None);
        assert_eq!(user.role_id, None);
    }

    #[test]
    fn test_user_role_is_kept_out_of_create_body() {
        let new = user_create(fields(&[
            "username=nurse",
            "email=n@clinic.test",
            "full_name=Nurse One",
            "password=secret",
            "role_id=3",
        ]))
        .unwrap();
        assert_eq!(new.role_id, Some(3));
        let body = serde_json::to_value(&new.user).unwrap();
        assert!(body.get("role_id").is_none());
    }
}
