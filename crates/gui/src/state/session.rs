//! Account session: register/login and cloud room save/load

use std::sync::mpsc::{channel, Receiver};

use serde_json::Value;

use shared::market::{LoginRequest, LoginResponse, RegisterRequest, SaveRoomRequest};
use shared::RoomData;

use crate::remote::RemoteClient;

/// Logged-in user
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub email: String,
    pub token: String,
    pub user_id: String,
}

/// Credentials form
#[derive(Default)]
pub struct AuthInput {
    pub email: String,
    pub password: String,
}

#[derive(Default)]
pub struct SessionState {
    user: Option<UserInfo>,
    pub input: AuthInput,
    pub is_registering: bool,
    pub show_dialog: bool,
    pub is_busy: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    rx_login: Option<Receiver<Result<LoginResponse, String>>>,
    rx_register: Option<Receiver<Result<Value, String>>>,
    rx_save: Option<Receiver<Result<Value, String>>>,
    rx_load: Option<Receiver<Result<Option<RoomData>, String>>>,
}

impl SessionState {
    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.status = None;
    }

    /// Submit the credentials form
    pub fn submit(&mut self, remote: &RemoteClient) {
        if self.is_busy || self.input.email.trim().is_empty() {
            return;
        }
        self.is_busy = true;
        self.error = None;

        if self.is_registering {
            let (tx, rx) = channel();
            remote.post(
                "/register",
                RegisterRequest {
                    email: self.input.email.trim().to_string(),
                    password: self.input.password.clone(),
                },
                tx,
            );
            self.rx_register = Some(rx);
        } else {
            let (tx, rx) = channel();
            remote.post(
                "/login",
                LoginRequest {
                    email: self.input.email.trim().to_string(),
                    password: self.input.password.clone(),
                },
                tx,
            );
            self.rx_login = Some(rx);
        }
    }

    /// Push the current room to the cloud
    pub fn save_room(&mut self, remote: &RemoteClient, room: &RoomData) {
        let Some(user) = &self.user else {
            return;
        };
        let (tx, rx) = channel();
        remote.post(
            "/save-room",
            SaveRoomRequest {
                user_id: user.user_id.clone(),
                room: room.clone(),
            },
            tx,
        );
        self.rx_save = Some(rx);
    }

    /// Fetch the saved room for the logged-in user
    pub fn load_room(&mut self, remote: &RemoteClient) {
        let Some(user) = &self.user else {
            return;
        };
        let (tx, rx) = channel();
        remote.get(&format!("/load-room/{}", user.user_id), tx);
        self.rx_load = Some(rx);
    }

    /// Drain finished calls. A successful login automatically requests
    /// the saved room; the loaded room (if any) is returned to the
    /// caller to apply.
    pub fn poll(&mut self, remote: &RemoteClient) -> Option<RoomData> {
        if let Some(result) = self.rx_login.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_login = None;
            self.is_busy = false;
            match result {
                Ok(resp) => {
                    self.user = Some(UserInfo {
                        email: resp.email,
                        token: resp.token,
                        user_id: resp.user_id,
                    });
                    self.show_dialog = false;
                    self.input = AuthInput::default();
                    self.error = None;
                    // load the cloud room right after login
                    self.load_room(remote);
                }
                Err(e) => self.error = Some(e),
            }
        }

        if let Some(result) = self.rx_register.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_register = None;
            self.is_busy = false;
            match result {
                Ok(_) => {
                    self.is_registering = false;
                    self.status = Some("Registered! Please log in.".to_string());
                    self.error = None;
                }
                Err(e) => self.error = Some(e),
            }
        }

        if let Some(result) = self.rx_save.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_save = None;
            match result {
                Ok(_) => self.status = Some("Room saved to cloud".to_string()),
                Err(e) => self.error = Some(e),
            }
        }

        if let Some(result) = self.rx_load.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_load = None;
            match result {
                Ok(room) => return room,
                Err(e) => self.error = Some(e),
            }
        }

        None
    }
}
