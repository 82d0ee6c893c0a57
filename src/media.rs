// Result panel: the generated image or video plus its link actions.
use wasm_bindgen_futures::{spawn_local, JsFuture};
use yew::prelude::*;

use crate::error::CopyError;
use crate::state::Artifact;

#[derive(Properties, PartialEq)]
pub struct MediaPanelProps {
    pub result: Option<Artifact>,
}

async fn copy_link(link: String) -> Result<(), CopyError> {
    let clip = web_sys::window().ok_or(CopyError::NoWindow)?.navigator().clipboard();
    JsFuture::from(clip.write_text(&link))
        .await
        .map_err(|_| CopyError::Rejected)?;
    Ok(())
}

#[function_component(MediaPanel)]
pub fn media_panel(props: &MediaPanelProps) -> Html {
    let copy_note = use_state(|| None::<String>);

    // A new result starts without a stale "copied" note.
    {
        let copy_note = copy_note.clone();
        use_effect_with(props.result.clone(), move |_| {
            copy_note.set(None);
            || ()
        });
    }

    let Some(artifact) = props.result.as_ref() else {
        return html! {};
    };
    let src = artifact.src().to_string();

    let on_copy = {
        let copy_note = copy_note.clone();
        let src = src.clone();
        Callback::from(move |_: MouseEvent| {
            let copy_note = copy_note.clone();
            let src = src.clone();
            spawn_local(async move {
                match copy_link(src).await {
                    Ok(()) => copy_note.set(Some("Link copied.".into())),
                    Err(e) => copy_note.set(Some(e.to_string())),
                }
            });
        })
    };

    let media = match artifact {
        Artifact::Image(_) => html! {
            <img class="media" src={src.clone()} alt="Generated AI Art" />
        },
        Artifact::Video(_) => html! {
            <video class="media" src={src.clone()} controls={true} />
        },
    };

    html! {
      <div class="result">
        { media }

        <div class="btnRow">
          <a href={src} target="_blank" rel="noopener noreferrer">
            { format!("Open {}", artifact.kind().noun()) }
          </a>
          <button class="ghost" onclick={on_copy}>{ "Copy Link" }</button>
        </div>

        if let Some(note) = (*copy_note).clone() {
          <div class="small">{ note }</div>
        }
      </div>
    }
}
