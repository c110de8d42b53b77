//! In-process backend.
//!
//! The workshop list lives in memory, seeded with the stock catalog.
//! Registered accounts and the single active session are persisted as two
//! JSON-encoded entries under the data directory, one file each.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ErrorKind, Result};
use crate::guard;
use crate::interface::{SessionApi, WorkshopApi};
use crate::model::dtos::{
    Credentials, EnrollmentRequest, NewAccount, RegistrationReceipt, StudentRecord, WorkshopDraft,
    WorkshopUpdate,
};
use crate::model::structs::{Account, Role, User, Workshop, WorkshopStatus};

const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";

pub struct LocalClient {
    data_dir: PathBuf,
    workshops: Mutex<Vec<Workshop>>,
}

impl LocalClient {
    /// Open a store over `data_dir`, creating the directory and seeding
    /// the stock accounts on first use.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<LocalClient> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let client = LocalClient {
            data_dir,
            workshops: Mutex::new(seed_workshops()),
        };
        if !client.users_path().exists() {
            client.write_users(&seed_accounts())?;
        }
        Ok(client)
    }

    fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    fn read_users(&self) -> Result<Vec<Account>> {
        let path = self.users_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_users(&self, accounts: &[Account]) -> Result<()> {
        fs::write(self.users_path(), serde_json::to_string_pretty(accounts)?)?;
        Ok(())
    }
}

impl SessionApi for LocalClient {
    async fn register_account(&self, account: &NewAccount) -> Result<()> {
        account.validate()?;

        let mut users = self.read_users()?;
        if users.iter().any(|u| u.email == account.email) {
            return Err(ErrorKind::DuplicateEmail(account.email.clone()).into());
        }

        // Registration never grants a role; admins come from seed data.
        users.push(Account {
            name: account.name.clone(),
            email: account.email.clone(),
            password: account.password.clone(),
            role: Role::Student,
        });
        self.write_users(&users)
    }

    async fn login(&self, credentials: &Credentials) -> Result<User> {
        let users = self.read_users()?;
        let found = users
            .iter()
            .find(|u| u.email == credentials.email && u.password == credentials.password)
            .ok_or(ErrorKind::InvalidCredentials)?;

        let user = found.user();
        fs::write(self.session_path(), serde_json::to_string(&user)?)?;
        Ok(user)
    }

    fn current_session(&self) -> Result<Option<User>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn logout(&self) -> Result<()> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl WorkshopApi for LocalClient {
    async fn fetch_workshops(&self) -> Result<Vec<Workshop>> {
        Ok(self.workshops.lock().unwrap().clone())
    }

    async fn create_workshop(&self, draft: &WorkshopDraft) -> Result<Workshop> {
        draft.validate()?;

        let mut workshops = self.workshops.lock().unwrap();
        let id = workshops.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let workshop = Workshop {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            date: draft.date.clone(),
            time: draft.time.clone(),
            category: draft.category.clone(),
            capacity: draft.capacity,
            enrolled: 0,
            status: WorkshopStatus::Active,
        };
        workshops.push(workshop.clone());
        Ok(workshop)
    }

    async fn update_workshop(&self, id: u32, update: &WorkshopUpdate) -> Result<Workshop> {
        update.fields.validate()?;

        let mut workshops = self.workshops.lock().unwrap();
        let workshop = workshops
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ErrorKind::WorkshopNotFound(id))?;

        workshop.title = update.fields.title.clone();
        workshop.description = update.fields.description.clone();
        workshop.location = update.fields.location.clone();
        workshop.date = update.fields.date.clone();
        workshop.time = update.fields.time.clone();
        workshop.category = update.fields.category.clone();
        workshop.capacity = update.fields.capacity;
        // One-way lifecycle: a cancelled workshop stays cancelled.
        if workshop.status.is_active() {
            workshop.status = update.status;
        }
        Ok(workshop.clone())
    }

    async fn delete_workshop(&self, id: u32) -> Result<()> {
        let mut workshops = self.workshops.lock().unwrap();
        let before = workshops.len();
        workshops.retain(|w| w.id != id);
        if workshops.len() == before {
            return Err(ErrorKind::WorkshopNotFound(id).into());
        }
        Ok(())
    }

    async fn register_student(
        &self,
        id: u32,
        request: &EnrollmentRequest,
    ) -> Result<RegistrationReceipt> {
        request.validate()?;

        let mut workshops = self.workshops.lock().unwrap();
        let workshop = workshops
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ErrorKind::WorkshopNotFound(id))?;

        guard::admit(workshop)?;

        Ok(RegistrationReceipt {
            message: "Registration successful".to_string(),
            student: StudentRecord {
                name: request.student_name.clone(),
                email: request.student_email.clone(),
                workshop_id: id,
            },
            workshop: workshop.clone(),
        })
    }
}

/// The stock catalog every fresh store starts with.
fn seed_workshops() -> Vec<Workshop> {
    vec![
        Workshop {
            id: 1,
            title: "Taller de Python Avanzado".to_string(),
            description:
                "Aprende características avanzadas de Python como decoradores, generadores y metaclases."
                    .to_string(),
            location: "Sala 1".to_string(),
            date: "2025-01-15".to_string(),
            time: "10:00".to_string(),
            category: "Programación".to_string(),
            capacity: 20,
            enrolled: 0,
            status: WorkshopStatus::Active,
        },
        Workshop {
            id: 2,
            title: "Diseño UX/UI para Principiantes".to_string(),
            description: "Fundamentos de diseño de experiencia de usuario e interfaces."
                .to_string(),
            location: "Sala 3".to_string(),
            date: "2025-01-20".to_string(),
            time: "14:00".to_string(),
            category: "Diseño".to_string(),
            capacity: 15,
            enrolled: 0,
            status: WorkshopStatus::Active,
        },
    ]
}

fn seed_accounts() -> Vec<Account> {
    vec![
        Account {
            name: "admin".to_string(),
            email: "admin@talleres.local".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        },
        Account {
            name: "student".to_string(),
            email: "student@talleres.local".to_string(),
            password: "student123".to_string(),
            role: Role::Student,
        },
    ]
}
