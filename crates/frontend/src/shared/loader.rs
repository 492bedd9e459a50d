use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

use super::api_utils::get_json;
use super::toast::ToastService;

/// GET `path` в `target`; при ошибке `target` не меняется, текст уходит в toast
pub fn load_into<T>(path: String, target: RwSignal<T>, loading: RwSignal<bool>, toast: ToastService)
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    loading.set(true);
    spawn_local(async move {
        match get_json::<T>(&path).await {
            Ok(data) => target.set(data),
            Err(e) => toast.error(e),
        }
        loading.set(false);
    });
}
