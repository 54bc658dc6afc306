use crate::components::forms::{TextAreaField, TextField};
use crate::pages::creator::utils::{VideoFormState, MAX_DESCRIPTION_LEN};
use leptos::*;

fn description_counter(length: usize) -> String {
    format!("{} / {}", length, MAX_DESCRIPTION_LEN)
}

/// Title, description and price inputs bound to `form`.
#[component]
pub fn VideoFormFields(
    form: VideoFormState,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let disabled = Signal::derive(move || disabled.get());
    let description_count = move || {
        form.description
            .with(|description| description.chars().count())
    };

    view! {
        <div class="space-y-4">
            <TextField
                id="video-title"
                label="Title"
                value=form.title
                placeholder="Intro to ownership"
                error=form.title_error()
                disabled=disabled
            />
            <div>
                <TextAreaField
                    id="video-description"
                    label="Description"
                    value=form.description
                    rows=5
                    error=form.description_error()
                    disabled=disabled
                />
                <p class="mt-1 text-xs text-fg-muted text-right">
                    {move || description_counter(description_count())}
                </p>
            </div>
            <TextField
                id="video-price"
                label="Price (USD)"
                value=form.price
                input_type="text"
                placeholder="0.00"
                error=form.price_error()
                disabled=disabled
            />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn fields_render_with_counter() {
        let html = render_to_string(|| {
            let form = VideoFormState::default();
            form.description.set("hello".into());
            view! { <VideoFormFields form=form /> }
        });
        assert!(html.contains("for=\"video-title\""));
        assert!(html.contains("Price (USD)"));
        assert!(html.contains("text-right"));
        assert!(html.contains("5000"));
    }

    #[test]
    fn counter_shows_length_against_limit() {
        assert_eq!(description_counter(5), "5 / 5000");
        assert_eq!(description_counter(0), "0 / 5000");
    }
}
