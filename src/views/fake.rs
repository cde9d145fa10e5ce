//! In-memory [`EstateApi`] that records every call, for view tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::client::{ClientError, ClientResult, EstateApi};
use crate::model::{Credentials, Property, PropertyDraft, PropertyId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    List,
    Get(PropertyId),
    Create(PropertyDraft),
    Update(PropertyId, PropertyDraft),
    Delete(PropertyId),
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, String>,
    properties: BTreeMap<PropertyId, Property>,
    next_id: PropertyId,
    calls: Vec<Call>,
    offline: bool,
}

#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
        self
    }

    /// Seed a property without recording a call
    pub fn seed(&self, draft: PropertyDraft) -> Property {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let property = draft.with_id(inner.next_id);
        inner.properties.insert(property.id, property.clone());
        property
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    /// Make every subsequent call fail as if the backend were down
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().unwrap().offline = offline;
    }

    fn record(&self, call: Call) -> ClientResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.offline {
            return Err(ClientError::Unavailable);
        }
        Ok(inner)
    }
}

#[async_trait]
impl EstateApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ClientResult<()> {
        let inner = self.record(Call::Login(credentials.username.clone()))?;
        match inner.users.get(&credentials.username) {
            Some(password) if *password == credentials.password => Ok(()),
            _ => Err(ClientError::Unauthorized),
        }
    }

    async fn register(&self, credentials: &Credentials) -> ClientResult<()> {
        let mut inner = self.record(Call::Register(credentials.username.clone()))?;
        if inner.users.contains_key(&credentials.username) {
            return Err(ClientError::Conflict("User already registered".to_string()));
        }
        inner
            .users
            .insert(credentials.username.clone(), credentials.password.clone());
        Ok(())
    }

    async fn list_properties(&self) -> ClientResult<Vec<Property>> {
        let inner = self.record(Call::List)?;
        Ok(inner.properties.values().cloned().collect())
    }

    async fn get_property(&self, id: PropertyId) -> ClientResult<Property> {
        let inner = self.record(Call::Get(id))?;
        inner
            .properties
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("Property {} not found", id)))
    }

    async fn create_property(&self, draft: &PropertyDraft) -> ClientResult<Property> {
        let mut inner = self.record(Call::Create(draft.clone()))?;
        inner.next_id += 1;
        let property = draft.clone().with_id(inner.next_id);
        inner.properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn update_property(
        &self,
        id: PropertyId,
        draft: &PropertyDraft,
    ) -> ClientResult<Property> {
        let mut inner = self.record(Call::Update(id, draft.clone()))?;
        match inner.properties.get_mut(&id) {
            Some(existing) => {
                *existing = draft.clone().with_id(id);
                Ok(existing.clone())
            }
            None => Err(ClientError::NotFound(format!("Property {} not found", id))),
        }
    }

    async fn delete_property(&self, id: PropertyId) -> ClientResult<()> {
        let mut inner = self.record(Call::Delete(id))?;
        inner
            .properties
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound(format!("Property {} not found", id)))
    }
}
