//! Profile page: `GET /api/profile` into the form, `PUT` on submit.

use std::rc::Rc;

use crate::application::feedback::{Feedback, ToastKind};
use crate::domain::{
    errors::AppResult,
    logging::LogComponent,
    preferences::{ProfileUpdate, UserProfile},
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};

pub const LOAD_FAILED: &str = "Tidak dapat memuat profil.";

pub trait ProfileView {
    fn show_profile(&self, profile: &UserProfile);
    /// Name and password as typed. An empty password means "unchanged".
    fn read_update(&self) -> (String, String);
    fn clear_password(&self);
}

pub struct ProfilePage<T, V> {
    api: Rc<QuantumApi<T>>,
    view: Rc<V>,
    feedback: Rc<dyn Feedback>,
}

impl<T: HttpTransport + 'static, V: ProfileView + 'static> ProfilePage<T, V> {
    pub fn new(api: Rc<QuantumApi<T>>, view: Rc<V>, feedback: Rc<dyn Feedback>) -> Self {
        Self { api, view, feedback }
    }

    pub async fn load(&self) -> AppResult<UserProfile> {
        match self.api.profile().await {
            Ok(profile) => {
                self.view.show_profile(&profile);
                Ok(profile)
            }
            Err(err) => {
                crate::log_error!(LogComponent::Presentation("Profile"), "load failed: {}", err);
                self.feedback.notify(LOAD_FAILED, ToastKind::Error);
                Err(err)
            }
        }
    }

    /// Sends the name, plus the password only when one was typed, then reloads.
    pub async fn save(&self) -> AppResult<()> {
        let (name, password) = self.view.read_update();
        let update = ProfileUpdate::new(&name, &password);
        match self.api.update_profile(&update).await {
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| "Profil berhasil diperbarui".to_string());
                self.feedback.notify(&message, ToastKind::Success);
                self.view.clear_password();
                let _ = self.load().await;
                Ok(())
            }
            Err(err) => {
                self.feedback.notify(
                    &format!("Gagal memperbarui profil: {}", err.user_message()),
                    ToastKind::Error,
                );
                Err(err)
            }
        }
    }
}
