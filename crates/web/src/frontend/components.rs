//! Guard components for Leptos routes.

use chrono::Utc;
use leptos::*;
use leptos_router::use_navigate;

use console_auth::{AuthorizationQuery, Session};

use crate::frontend::ConsoleGuard;
use crate::guard::screen_gate;
use crate::routes::Route;

/// Runs the route guard before rendering `children`.
///
/// Redirects happen from an effect, after this component has rendered
/// nothing. On success the session is provided to descendants for [`Gate`].
#[component]
pub fn Guarded(route: Route, children: ChildrenFn) -> impl IntoView {
    let guard = expect_context::<ConsoleGuard>();
    let decision = guard.resolve(route.access, Utc::now());

    let outcome = decision.outcome;
    let from = route.path.to_string();
    let navigate = use_navigate();
    create_effect(move |_| {
        let navigator = |target: &str| navigate(target, Default::default());
        guard.redirect(outcome, &from, &navigator);
    });

    let (session, _) = create_signal(decision.session.clone());
    provide_context(session);

    decision.screen(&route).render(|| children()).into_view()
}

/// Renders `children` only when the current session satisfies `can`/`has`.
///
/// ```ignore
/// <Gate can="view_inventarios" has="Confinus">
///     <InventoryTable/>
/// </Gate>
/// ```
#[component]
pub fn Gate(
    #[prop(optional, into)] can: Option<String>,
    #[prop(optional, into)] has: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_context::<ReadSignal<Option<Session>>>();
    let query = AuthorizationQuery::from_parts(can, has);

    move || {
        let current = session.and_then(|s| s.get());
        screen_gate(current.as_ref(), &query).render(|| children())
    }
}
