//! Authentication-flow tests driven against an in-memory credential store.
//! The store trait is injected, so the whole state machine runs without a
//! database or a live server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use paroquia_api::auth::password::hash_password;
use paroquia_api::auth::token::TokenService;
use paroquia_api::config::SecurityConfig;
use paroquia_api::database::models::perfil::Perfil;
use paroquia_api::database::models::usuario::Usuario;
use paroquia_api::database::store::{CredentialStore, StoreError};
use paroquia_api::services::auth_service::{AuthError, AuthService};

// Minimum bcrypt cost keeps the suite fast; production cost comes from config.
const TEST_COST: u32 = 4;

#[derive(Default)]
struct FakeStore {
    usuarios: Mutex<Vec<Usuario>>,
    perfis: Mutex<Vec<Perfil>>,
    touch_count: AtomicUsize,
    fail_touch: bool,
    fail_perfil: bool,
}

impl FakeStore {
    fn with_usuario(usuario: Usuario) -> Arc<Self> {
        let store = Self::default();
        store.usuarios.lock().unwrap().push(usuario);
        Arc::new(store)
    }

    fn usuario_by_email(&self, email: &str) -> Option<Usuario> {
        self.usuarios
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    fn deactivate(&self, id: Uuid) {
        let mut usuarios = self.usuarios.lock().unwrap();
        if let Some(u) = usuarios.iter_mut().find(|u| u.id == id) {
            u.ativo = false;
        }
    }
}

#[async_trait]
impl CredentialStore for FakeStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, StoreError> {
        Ok(self.usuario_by_email(email))
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Usuario>, StoreError> {
        Ok(self
            .usuarios
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && u.ativo)
            .cloned())
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        hash: &str,
        clear_temporaria: bool,
    ) -> Result<bool, StoreError> {
        let mut usuarios = self.usuarios.lock().unwrap();
        match usuarios.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.senha_hash = Some(hash.to_string());
                if clear_temporaria {
                    u.senha_temporaria = None;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn touch_ultimo_login(&self, id: Uuid) -> Result<(), StoreError> {
        if self.fail_touch {
            return Err(StoreError::Unavailable("touch refused".into()));
        }
        self.touch_count.fetch_add(1, Ordering::SeqCst);
        let mut usuarios = self.usuarios.lock().unwrap();
        if let Some(u) = usuarios.iter_mut().find(|u| u.id == id) {
            u.ultimo_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn find_perfil(&self, id: Uuid) -> Result<Option<Perfil>, StoreError> {
        if self.fail_perfil {
            return Err(StoreError::Unavailable("perfil lookup refused".into()));
        }
        Ok(self
            .perfis
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
}

fn security() -> SecurityConfig {
    SecurityConfig {
        jwt_secret: "flow-test-secret".into(),
        jwt_expiry_hours: 24,
        bcrypt_cost: TEST_COST,
    }
}

fn usuario(email: &str, hash: Option<String>, temporaria: Option<&str>, ativo: bool) -> Usuario {
    let now = Utc::now();
    Usuario {
        id: Uuid::new_v4(),
        email: email.into(),
        senha_hash: hash,
        senha_temporaria: temporaria.map(Into::into),
        ativo,
        ultimo_login: None,
        perfil_id: None,
        pessoa_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn service(store: Arc<FakeStore>) -> AuthService<Arc<FakeStore>> {
    AuthService::new(store, TokenService::new(&security()), TEST_COST)
}

async fn hashed(senha: &str) -> Option<String> {
    Some(hash_password(senha.into(), TEST_COST).await.unwrap())
}

#[tokio::test]
async fn login_issues_token_and_touches_last_login() -> Result<()> {
    let store = FakeStore::with_usuario(usuario(
        "a@b.com",
        hashed("Senha@123").await,
        None,
        true,
    ));
    let auth = service(store.clone());

    let result = auth.login("a@b.com", "Senha@123").await?;
    assert!(result.token.is_some());
    assert!(!result.requires_password_change);
    assert_eq!(result.user.email, "a@b.com");
    assert_eq!(store.touch_count.load(Ordering::SeqCst), 1);
    assert!(store.usuario_by_email("a@b.com").unwrap().ultimo_login.is_some());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() -> Result<()> {
    let store = FakeStore::with_usuario(usuario(
        "a@b.com",
        hashed("Senha@123").await,
        None,
        true,
    ));
    let auth = service(store);

    let wrong = auth.login("a@b.com", "Senha@124").await;
    let unknown = auth.login("nobody@b.com", "Senha@123").await;

    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    Ok(())
}

#[tokio::test]
async fn inactive_user_is_blocked_even_with_correct_password() -> Result<()> {
    let store = FakeStore::with_usuario(usuario(
        "a@b.com",
        hashed("Senha@123").await,
        None,
        false,
    ));
    let auth = service(store);

    let result = auth.login("a@b.com", "Senha@123").await;
    assert!(matches!(result, Err(AuthError::UserInactive)));
    Ok(())
}

#[tokio::test]
async fn temporary_password_match_requires_change_without_token() -> Result<()> {
    let store = FakeStore::with_usuario(usuario("a@b.com", None, Some("T3mp!"), true));
    let auth = service(store.clone());

    let result = auth.login("a@b.com", "T3mp!").await?;
    assert!(result.requires_password_change);
    assert!(result.token.is_none());
    // The temporary password is cleared by the change flow, never by login.
    assert!(store
        .usuario_by_email("a@b.com")
        .unwrap()
        .senha_temporaria
        .is_some());
    Ok(())
}

#[tokio::test]
async fn temporary_password_takes_precedence_over_the_hash() -> Result<()> {
    // Both credentials set: the hash never wins while a temporary password
    // is pending.
    let store = FakeStore::with_usuario(usuario(
        "a@b.com",
        hashed("Senha@123").await,
        Some("T3mp!"),
        true,
    ));
    let auth = service(store);

    let with_real_password = auth.login("a@b.com", "Senha@123").await;
    assert!(matches!(
        with_real_password,
        Err(AuthError::PasswordChangeRequired)
    ));

    let with_temporary = auth.login("a@b.com", "T3mp!").await?;
    assert!(with_temporary.requires_password_change);
    Ok(())
}

#[tokio::test]
async fn touch_failure_does_not_block_login() -> Result<()> {
    let store = Arc::new(FakeStore {
        fail_touch: true,
        ..FakeStore::default()
    });
    store
        .usuarios
        .lock()
        .unwrap()
        .push(usuario("a@b.com", hashed("Senha@123").await, None, true));
    let auth = service(store);

    let result = auth.login("a@b.com", "Senha@123").await?;
    assert!(result.token.is_some());
    Ok(())
}

#[tokio::test]
async fn first_access_rotates_and_clears_the_temporary_password() -> Result<()> {
    let store = FakeStore::with_usuario(usuario("a@b.com", None, Some("T3mp!"), true));
    let auth = service(store.clone());

    auth.first_access_change("a@b.com", "T3mp!", "Senha@123").await?;

    let stored = store.usuario_by_email("a@b.com").unwrap();
    assert!(stored.senha_temporaria.is_none());
    assert!(stored.senha_hash.is_some());

    // The old bootstrap value no longer logs in; the new password does.
    let old = auth.login("a@b.com", "T3mp!").await;
    assert!(matches!(old, Err(AuthError::InvalidCredentials)));
    let result = auth.login("a@b.com", "Senha@123").await?;
    assert!(result.token.is_some());
    Ok(())
}

#[tokio::test]
async fn first_access_rejects_weak_replacement() -> Result<()> {
    let store = FakeStore::with_usuario(usuario("a@b.com", None, Some("T3mp!"), true));
    let auth = service(store.clone());

    let result = auth.first_access_change("a@b.com", "T3mp!", "Weak1").await;
    match result {
        Err(AuthError::WeakPassword(strength)) => {
            // "Weak1" satisfies upper, lower and number only.
            assert_eq!(strength.score, 3);
            assert!(!strength.requirements.length);
            assert!(!strength.requirements.special);
        }
        other => panic!("expected WeakPassword, got {other:?}"),
    }
    // Nothing was persisted.
    assert!(store.usuario_by_email("a@b.com").unwrap().senha_hash.is_none());
    Ok(())
}

#[tokio::test]
async fn first_access_requires_exact_temporary_match() -> Result<()> {
    let store = FakeStore::with_usuario(usuario("a@b.com", None, Some("T3mp!"), true));
    let auth = service(store);

    let wrong = auth.first_access_change("a@b.com", "t3mp!", "Senha@123").await;
    assert!(matches!(wrong, Err(AuthError::InvalidTempPassword)));

    let unknown = auth
        .first_access_change("nobody@b.com", "T3mp!", "Senha@123")
        .await;
    assert!(matches!(unknown, Err(AuthError::UserNotFound)));
    Ok(())
}

#[tokio::test]
async fn first_access_treats_inactive_user_as_not_found() -> Result<()> {
    let store = FakeStore::with_usuario(usuario("a@b.com", None, Some("T3mp!"), false));
    let auth = service(store);

    let result = auth.first_access_change("a@b.com", "T3mp!", "Senha@123").await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
    Ok(())
}

#[tokio::test]
async fn change_password_validates_the_current_one() -> Result<()> {
    let record = usuario("a@b.com", hashed("Senha@123").await, None, true);
    let id = record.id;
    let store = FakeStore::with_usuario(record);
    let auth = service(store);

    let wrong = auth.change_password(id, "Senha@999", "Outra@456").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    auth.change_password(id, "Senha@123", "Outra@456").await?;
    let result = auth.login("a@b.com", "Outra@456").await?;
    assert!(result.token.is_some());
    Ok(())
}

#[tokio::test]
async fn reset_bypasses_the_current_password() -> Result<()> {
    let record = usuario("a@b.com", hashed("Senha@123").await, None, true);
    let id = record.id;
    let store = FakeStore::with_usuario(record);
    let auth = service(store);

    let resumo = auth.reset_password(id, "Nova@1234").await?;
    assert_eq!(resumo.email, "a@b.com");

    let result = auth.login("a@b.com", "Nova@1234").await?;
    assert!(result.token.is_some());

    let unknown = auth.reset_password(Uuid::new_v4(), "Nova@1234").await;
    assert!(matches!(unknown, Err(AuthError::UserNotFound)));
    Ok(())
}

#[tokio::test]
async fn verify_round_trips_the_issued_token() -> Result<()> {
    let perfil_id = Uuid::new_v4();
    let mut record = usuario("a@b.com", hashed("Senha@123").await, None, true);
    record.perfil_id = Some(perfil_id);
    let id = record.id;

    let store = FakeStore::with_usuario(record);
    let now = Utc::now();
    store.perfis.lock().unwrap().push(Perfil {
        id: perfil_id,
        nome: "Coordenador".into(),
        permissoes: sqlx::types::Json(HashMap::from([
            ("gerenciar_eventos".to_string(), true),
            ("gerenciar_usuarios".to_string(), false),
        ])),
        created_at: now,
        updated_at: now,
    });
    let auth = service(store);

    let token = auth.login("a@b.com", "Senha@123").await?.token.unwrap();
    let session = auth.verify(&token).await?;

    assert_eq!(session.user.id, id);
    assert_eq!(session.user.email, "a@b.com");
    assert_eq!(session.user.perfil_id, Some(perfil_id));
    assert_eq!(session.perfil_nome.as_deref(), Some("Coordenador"));
    assert_eq!(session.permissoes.get("gerenciar_eventos"), Some(&true));
    Ok(())
}

#[tokio::test]
async fn verify_rejects_tokens_of_deactivated_users() -> Result<()> {
    let record = usuario("a@b.com", hashed("Senha@123").await, None, true);
    let id = record.id;
    let store = FakeStore::with_usuario(record);
    let auth = service(store.clone());

    let token = auth.login("a@b.com", "Senha@123").await?.token.unwrap();
    store.deactivate(id);

    // The signature is still valid and unexpired; deactivation revokes it.
    let result = auth.verify(&token).await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
    Ok(())
}

#[tokio::test]
async fn verify_degrades_to_empty_permissions_when_perfil_fails() -> Result<()> {
    let mut record = usuario("a@b.com", hashed("Senha@123").await, None, true);
    record.perfil_id = Some(Uuid::new_v4());

    let store = Arc::new(FakeStore {
        fail_perfil: true,
        ..FakeStore::default()
    });
    store.usuarios.lock().unwrap().push(record);
    let auth = service(store);

    let token = auth.login("a@b.com", "Senha@123").await?.token.unwrap();
    let session = auth.verify(&token).await?;

    assert!(session.perfil_nome.is_none());
    assert!(session.permissoes.is_empty());
    Ok(())
}

#[tokio::test]
async fn verify_rejects_expired_and_garbage_tokens() -> Result<()> {
    let record = usuario("a@b.com", hashed("Senha@123").await, None, true);
    let id = record.id;
    let store = FakeStore::with_usuario(record);

    // An issuer whose tokens are born expired.
    let expired_issuer = TokenService::new(&SecurityConfig {
        jwt_secret: "flow-test-secret".into(),
        jwt_expiry_hours: -1,
        bcrypt_cost: TEST_COST,
    });
    let expired = expired_issuer.issue(id, "a@b.com", None).unwrap();

    let auth = service(store);
    assert!(matches!(
        auth.verify(&expired).await,
        Err(AuthError::TokenExpired)
    ));
    assert!(matches!(
        auth.verify("not.a.token").await,
        Err(AuthError::TokenInvalid)
    ));
    Ok(())
}
