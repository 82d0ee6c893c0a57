use gloo::console::error;
use gloo::dialogs::alert;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{self, MediaKind};
use crate::config::{self as app_config, AppConfig};
use crate::media::MediaPanel;
use crate::state::{Action, GeneratorState, Phase};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(AppConfig::default);
    let state = use_reducer(GeneratorState::default);

    // Load generator-config.json once
    {
        let config = config.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                config.set(app_config::load().await);
            });
            || ()
        });
    }

    // Browser tab follows the configured variant/title
    use_effect_with(config.title().to_string(), |title| {
        gloo::utils::document().set_title(title);
        || ()
    });

    // Only failures the reducer actually applied reach the console.
    use_effect_with(state.phase.clone(), |phase| {
        if let Phase::Failed { kind, message } = phase {
            error!(format!("{} generation failed: {message}", kind.noun()));
        }
        || ()
    });

    // Blocking alert, once per raised alert
    use_effect_with(state.alert.clone(), |raised| {
        if let Some(a) = raised {
            alert(&a.message);
        }
        || ()
    });

    let on_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            state.dispatch(Action::EditPrompt(input.value()));
        })
    };

    let on_generate = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |kind: MediaKind| {
            let req = match state.prepare(kind) {
                Ok(req) => req,
                Err(msg) => {
                    state.dispatch(Action::Reject(msg));
                    return;
                }
            };

            let ticket = req.ticket;
            let prompt = req.prompt.clone();
            let api_base = config.api_base.clone();
            state.dispatch(Action::Begin(req));

            let state = state.clone();
            spawn_local(async move {
                let outcome = api::generate(&api_base, kind, &prompt).await;
                state.dispatch(Action::Resolve { ticket, outcome });
            });
        })
    };

    let variant = config.variant;
    let busy = state.is_busy();

    let buttons = variant.kinds().iter().map(|&kind| {
        let onclick = on_generate.reform(move |_: MouseEvent| kind);
        html! {
            <button {onclick} disabled={busy}>
                { state.button_label(variant.idle_label(kind)) }
            </button>
        }
    });

    let pending_note = match &state.phase {
        Phase::Pending { kind, .. } => html! {
            <div class="small">{ format!("Rendering your {}… this can take a while on CPU.", kind.noun()) }</div>
        },
        Phase::Failed { message, .. } => html! {
            <div class="err">{ format!("Last attempt failed: {message}") }</div>
        },
        _ => html! {},
    };

    html! {
      <div class="wrap">
        <h1>{ config.title() }</h1>

        <div class="controls">
          <input
            type="text"
            placeholder="Enter your AI prompt..."
            value={state.prompt.clone()}
            oninput={on_input}
          />
          { for buttons }
        </div>

        { pending_note }

        if let Some(status) = state.status.clone() {
          <div class="small">{ status }</div>
        }

        <MediaPanel result={state.result.clone()} />
      </div>
    }
}
