use archive_core::{ArchiveAction, Route};
use leptos::{ev, on_cleanup, window_event_listener, Callable, Callback};

/// Route for the location currently shown in the address bar.
pub(super) fn current_route() -> Route {
    #[cfg(target_arch = "wasm32")]
    {
        leptos::window()
            .location()
            .pathname()
            .map(|path| Route::parse(&path))
            .unwrap_or(Route::Home)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Route::Home
    }
}

pub(super) fn push_route(route: Route) {
    #[cfg(target_arch = "wasm32")]
    {
        use leptos::logging;
        use wasm_bindgen::JsValue;

        let window = leptos::window();
        let path = route.path();
        if window.location().pathname().ok().as_deref() == Some(path) {
            return;
        }
        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Err(err) = pushed {
            logging::warn!("push route `{path}` failed: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = route;
}

pub(super) fn install_location_listener(dispatch: Callback<ArchiveAction>) {
    let listener = window_event_listener(ev::popstate, move |_| {
        dispatch.call(ArchiveAction::Navigate(current_route()));
    });
    on_cleanup(move || listener.remove());
}
