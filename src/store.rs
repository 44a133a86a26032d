//! Single-instance client state: session, token, and the testimonial
//! list cache, reconciled with server truth after each mutation.
//!
//! The store is the only owner of mutable client state. Views read from
//! it and dispatch mutations through it; nothing else touches the token
//! store or the cache. Mutations never update the cache optimistically:
//! invalidation happens only after the server confirms, and moderation
//! calls do not invalidate at all — observing their effect takes an
//! explicit refresh.

use crate::api::TestimonialApi;
use crate::cache::Query;
use crate::session::Session;
use crate::token_store::TokenStore;
use crate::types::{NewAccount, NewTestimonial, Testimonial, TestimonialPatch, User};
use anyhow::Result;

pub struct Store<C: TestimonialApi> {
    api: C,
    tokens: TokenStore,
    session: Session,
    testimonials: Query<Vec<Testimonial>>,
}

impl<C: TestimonialApi> Store<C> {
    pub fn new(api: C, tokens: TokenStore) -> Self {
        Self {
            api,
            tokens,
            session: Session::default(),
            testimonials: Query::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Log in. On success the token is persisted and the session primed
    /// with the returned user. On failure prior session state and token
    /// are left untouched and the error is returned as-is; the caller
    /// surfaces it generically.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let resp = self.api.login(email, password)?;
        self.tokens.save(&resp.token)?;
        self.session.sign_in(resp.user.clone());
        Ok(resp.user)
    }

    /// Register a new account. Same contract as [`Store::login`].
    pub fn register(&mut self, account: &NewAccount) -> Result<User> {
        let resp = self.api.register(account)?;
        self.tokens.save(&resp.token)?;
        self.session.sign_in(resp.user.clone());
        Ok(resp.user)
    }

    /// Log out. Purely local: clears the stored token and the session.
    /// No request is made, so a server-side session (if any) lives on
    /// until it expires on its own.
    pub fn logout(&mut self) -> Result<()> {
        self.tokens.clear()?;
        self.session.sign_out();
        Ok(())
    }

    /// Ask the service who the stored token belongs to. Any failure —
    /// missing token, rejected token, network — reads as anonymous,
    /// with no retry.
    pub fn check_session(&mut self) -> bool {
        match self.api.me() {
            Ok(user) => {
                self.session.sign_in(user);
                true
            }
            Err(_) => {
                self.session.sign_out();
                false
            }
        }
    }

    /// Read-through list access: returns the cached list when fresh,
    /// otherwise fetches the full collection and primes the cache.
    pub fn testimonials(&mut self) -> Result<&[Testimonial]> {
        if !self.testimonials.is_fresh() {
            let list = self.api.list()?;
            self.testimonials.prime(list);
        }
        Ok(self.testimonials.value().map(Vec::as_slice).unwrap_or(&[]))
    }

    /// The cached list without any fetch, fresh or stale.
    pub fn cached_testimonials(&self) -> Option<&[Testimonial]> {
        self.testimonials.value().map(Vec::as_slice)
    }

    /// Force a refetch regardless of freshness.
    pub fn refresh(&mut self) -> Result<&[Testimonial]> {
        self.testimonials.invalidate();
        self.testimonials()
    }

    /// Submit a testimonial. On success the list cache is invalidated —
    /// only after the response is observed — so the next read refetches.
    /// The cache is not primed with the created entry.
    pub fn submit(&mut self, new: &NewTestimonial) -> Result<Testimonial> {
        let created = self.api.create(new)?;
        self.testimonials.invalidate();
        Ok(created)
    }

    // Moderation and edit operations are direct pass-throughs: no local
    // state change, no cache invalidation. Callers refresh to observe.

    pub fn approve(&mut self, id: &str) -> Result<()> {
        self.api.approve(id)
    }

    pub fn reject(&mut self, id: &str) -> Result<()> {
        self.api.reject(id)
    }

    pub fn update(&mut self, id: &str, patch: &TestimonialPatch) -> Result<Testimonial> {
        self.api.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Author, AuthResponse, TestimonialKind, TestimonialStatus};
    use anyhow::anyhow;
    use serial_test::serial;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            email: "dana@initech.example".to_string(),
            name: "Dana Reeve".to_string(),
            company: "Initech".to_string(),
            role: "CTO".to_string(),
            avatar: None,
        }
    }

    fn testimonial(id: &str, status: TestimonialStatus) -> Testimonial {
        Testimonial {
            id: id.to_string(),
            author: Author {
                name: "Dana Reeve".to_string(),
                role: "CTO".to_string(),
                company: "Initech".to_string(),
                avatar: None,
            },
            content: "Great tool".to_string(),
            rating: 5,
            kind: TestimonialKind::Text,
            video_url: None,
            date: "2025-11-02T09:30:00Z".to_string(),
            status,
        }
    }

    /// Fake service: records every call, serves a mutable in-memory list,
    /// and can be told to reject auth.
    struct FakeApi {
        calls: Rc<RefCell<Vec<&'static str>>>,
        reject_auth: bool,
        list: RefCell<Vec<Testimonial>>,
    }

    impl FakeApi {
        fn new(calls: Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self {
                calls,
                reject_auth: false,
                list: RefCell::new(Vec::new()),
            }
        }
    }

    impl TestimonialApi for FakeApi {
        fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse> {
            self.calls.borrow_mut().push("login");
            if self.reject_auth {
                return Err(anyhow!("API error 401: invalid credentials"));
            }
            Ok(AuthResponse {
                token: "tok-login".to_string(),
                user: user(),
            })
        }

        fn register(&self, _account: &NewAccount) -> Result<AuthResponse> {
            self.calls.borrow_mut().push("register");
            if self.reject_auth {
                return Err(anyhow!("API error 400: registration failed"));
            }
            Ok(AuthResponse {
                token: "tok-register".to_string(),
                user: user(),
            })
        }

        fn me(&self) -> Result<User> {
            self.calls.borrow_mut().push("me");
            if self.reject_auth {
                return Err(anyhow!("API error 401: bad token"));
            }
            Ok(user())
        }

        fn list(&self) -> Result<Vec<Testimonial>> {
            self.calls.borrow_mut().push("list");
            Ok(self.list.borrow().clone())
        }

        fn create(&self, new: &NewTestimonial) -> Result<Testimonial> {
            self.calls.borrow_mut().push("create");
            let mut t = testimonial("t-new", TestimonialStatus::Pending);
            t.content = new.content.clone();
            t.rating = new.rating;
            t.kind = new.kind;
            self.list.borrow_mut().push(t.clone());
            Ok(t)
        }

        fn update(&self, _id: &str, _patch: &TestimonialPatch) -> Result<Testimonial> {
            self.calls.borrow_mut().push("update");
            Ok(testimonial("t-new", TestimonialStatus::Pending))
        }

        fn delete(&self, _id: &str) -> Result<()> {
            self.calls.borrow_mut().push("delete");
            Ok(())
        }

        fn approve(&self, id: &str) -> Result<()> {
            self.calls.borrow_mut().push("approve");
            for t in self.list.borrow_mut().iter_mut() {
                if t.id == id {
                    t.status = TestimonialStatus::Approved;
                }
            }
            Ok(())
        }

        fn reject(&self, _id: &str) -> Result<()> {
            self.calls.borrow_mut().push("reject");
            Ok(())
        }
    }

    struct Fixture {
        store: Store<FakeApi>,
        calls: Rc<RefCell<Vec<&'static str>>>,
        tokens: TokenStore,
        _dir: tempfile::TempDir,
    }

    fn fixture(reject_auth: bool) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("VOUCH_HOME", dir.path());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut api = FakeApi::new(calls.clone());
        api.reject_auth = reject_auth;
        let tokens = TokenStore::new();
        Fixture {
            store: Store::new(api, tokens.clone()),
            calls,
            tokens,
            _dir: dir,
        }
    }

    #[test]
    #[serial]
    fn test_login_persists_token_and_authenticates() {
        let mut fx = fixture(false);

        let user = fx.store.login("dana@initech.example", "pw").unwrap();
        assert_eq!(user.name, "Dana Reeve");
        assert!(fx.store.is_authenticated());
        assert_eq!(fx.tokens.load().as_deref(), Some("tok-login"));
    }

    #[test]
    #[serial]
    fn test_failed_login_leaves_prior_session_untouched() {
        let mut fx = fixture(false);
        fx.store.login("dana@initech.example", "pw").unwrap();

        fx.store.api.reject_auth = true;
        assert!(fx.store.login("dana@initech.example", "wrong").is_err());

        // Idempotent no-op on failure: still authenticated, token intact.
        assert!(fx.store.is_authenticated());
        assert_eq!(fx.tokens.load().as_deref(), Some("tok-login"));
    }

    #[test]
    #[serial]
    fn test_register_persists_token_and_authenticates() {
        let mut fx = fixture(false);
        let account = NewAccount {
            email: "dana@initech.example".to_string(),
            password: "pw".to_string(),
            name: "Dana Reeve".to_string(),
            company: "Initech".to_string(),
            role: "CTO".to_string(),
        };

        fx.store.register(&account).unwrap();
        assert!(fx.store.is_authenticated());
        assert_eq!(fx.tokens.load().as_deref(), Some("tok-register"));
    }

    #[test]
    #[serial]
    fn test_logout_clears_locally_without_network() {
        let mut fx = fixture(false);
        fx.store.login("dana@initech.example", "pw").unwrap();
        fx.calls.borrow_mut().clear();

        fx.store.logout().unwrap();

        assert!(!fx.store.is_authenticated());
        assert!(fx.tokens.load().is_none());
        assert!(fx.calls.borrow().is_empty(), "logout must not call the service");
    }

    #[test]
    #[serial]
    fn test_logout_from_anonymous_is_fine() {
        let mut fx = fixture(false);
        fx.store.logout().unwrap();
        assert!(!fx.store.is_authenticated());
    }

    #[test]
    #[serial]
    fn test_failed_session_check_reads_as_anonymous() {
        let mut fx = fixture(true);
        assert!(!fx.store.check_session());
        assert!(!fx.store.is_authenticated());
        // Exactly one attempt, no retry.
        assert_eq!(*fx.calls.borrow(), vec!["me"]);
    }

    #[test]
    #[serial]
    fn test_list_is_cached_until_invalidated() {
        let mut fx = fixture(false);
        fx.store.testimonials().unwrap();
        fx.store.testimonials().unwrap();
        let lists = fx.calls.borrow().iter().filter(|c| **c == "list").count();
        assert_eq!(lists, 1);
    }

    #[test]
    #[serial]
    fn test_submit_invalidates_but_does_not_prime() {
        let mut fx = fixture(false);
        fx.store.testimonials().unwrap();
        assert_eq!(fx.store.cached_testimonials().map(|l| l.len()), Some(0));

        let new = NewTestimonial {
            content: "Great tool".to_string(),
            rating: 5,
            kind: TestimonialKind::Text,
            video: None,
        };
        fx.store.submit(&new).unwrap();

        // Stale value still served without a refetch; the new entry only
        // shows up once the list is actually re-read.
        assert_eq!(fx.store.cached_testimonials().map(|l| l.len()), Some(0));

        let after = fx.store.testimonials().unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].content, "Great tool");
        assert_eq!(after[0].status, TestimonialStatus::Pending);
    }

    #[test]
    #[serial]
    fn test_video_submission_without_file_is_accepted() {
        let mut fx = fixture(false);
        let new = NewTestimonial {
            content: "See the demo".to_string(),
            rating: 4,
            kind: TestimonialKind::Video,
            video: None,
        };
        let created = fx.store.submit(&new).unwrap();
        assert_eq!(created.kind, TestimonialKind::Video);
    }

    #[test]
    #[serial]
    fn test_moderation_does_not_touch_cache() {
        let mut fx = fixture(false);
        let new = NewTestimonial {
            content: "Great tool".to_string(),
            rating: 5,
            kind: TestimonialKind::Text,
            video: None,
        };
        let created = fx.store.submit(&new).unwrap();
        fx.store.testimonials().unwrap();

        fx.store.approve(&created.id).unwrap();

        // Cache still fresh with the pre-approval snapshot; the change is
        // only visible after an explicit refresh.
        assert_eq!(
            fx.store.cached_testimonials().unwrap()[0].status,
            TestimonialStatus::Pending
        );
        let refreshed = fx.store.refresh().unwrap();
        assert_eq!(refreshed[0].status, TestimonialStatus::Approved);
    }
}
