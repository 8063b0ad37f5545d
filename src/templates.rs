//! HTML pages served by the key generator.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::model_core::{KeyPair, KeyType, KeyTypeCatalog, DEFAULT_KEY_TYPE};

pub const APP_TITLE: &str = "SSH Key Generator";

// order of the type select
const FORM_KEY_TYPES: [KeyType; 4] = [KeyType::Ed25519, KeyType::Ecdsa, KeyType::Dsa, KeyType::Rsa];

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #eef0f7; color: #212529; }
    header { background: #3f51b5; color: #ffffff; padding: 16px 24px; }
    header a { color: inherit; text-decoration: none; font-size: 20px; font-weight: 600; }
    main { max-width: 720px; margin: 40px auto; padding: 0 16px; }
    .card { background: #ffffff; padding: 24px 32px; border-radius: 6px; box-shadow: 0 2px 6px rgba(0,0,0,0.15); }
    label { display: block; margin: 16px 0 6px; font-weight: 600; }
    select, textarea { width: 100%; box-sizing: border-box; padding: 8px; font-size: 14px; border: 1px solid #9fa8da; border-radius: 4px; }
    textarea { font-family: ui-monospace, monospace; resize: vertical; }
    button { background: #3f51b5; color: #ffffff; border: none; border-radius: 4px; padding: 10px 20px; margin-top: 16px; cursor: pointer; font-weight: 600; }
    button:hover { background: #303f9f; }
    .error { color: #b71c1c; }
"#;

const UPDATE_SIZES_SCRIPT: &str = r#"
    function updateKeySizes() {
      var keyType = document.getElementById('type').value;
      var keySizeSelect = document.getElementById('size');
      keySizeSelect.innerHTML = '';
      var keySizes = KEY_SIZES[keyType] || [];
      for (var i = 0; i < keySizes.length; i++) {
        var option = document.createElement('option');
        option.value = keySizes[i];
        option.text = keySizes[i];
        keySizeSelect.appendChild(option);
      }
    }
    document.getElementById('type').addEventListener('change', updateKeySizes);
"#;

const COPY_SCRIPT: &str = r#"
    function copyToClipboard(elementId) {
      var element = document.getElementById(elementId);
      element.select();
      element.setSelectionRange(0, 99999);
      navigator.clipboard.writeText(element.value).catch(function (error) {
        console.error('Failed to copy to clipboard:', error);
      });
    }
"#;

pub fn render_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header { a href="/" { (APP_TITLE) } }
                main {
                    div class="card" { (content) }
                }
            }
        }
    }
}

pub fn index_page(catalog: &KeyTypeCatalog) -> Markup {
    // catalog JSON is only type names and integers, safe inside <script>
    let catalog_json = serde_json::to_string(catalog).unwrap_or_else(|_| "{}".to_string());

    let content = html! {
        h2 { "Generate SSH Keys" }
        form action="/generate" method="post" {
            label for="type" { "Key Type" }
            select name="type" id="type" {
                @for key_type in FORM_KEY_TYPES {
                    option value=(key_type.as_str()) selected[key_type == DEFAULT_KEY_TYPE] {
                        (key_type.label())
                    }
                }
            }
            label for="size" { "Key Size" }
            select name="size" id="size" {
                @for size in catalog.sizes(DEFAULT_KEY_TYPE) {
                    option value=(size) { (size) }
                }
            }
            button type="submit" { "Generate" }
        }
        script {
            (PreEscaped(format!("var KEY_SIZES = {catalog_json};")))
            (PreEscaped(UPDATE_SIZES_SCRIPT))
        }
    };
    render_layout(APP_TITLE, content)
}

pub fn result_page(key_pair: &KeyPair) -> Markup {
    let content = html! {
        h2 { "Generated SSH Keys" }
        label for="public_key" { "Public Key" }
        textarea id="public_key" rows="5" readonly { (key_pair.public_key) }
        button type="button" onclick="copyToClipboard('public_key')" { "Copy Public Key" }
        label for="private_key" { "Private Key" }
        textarea id="private_key" rows="12" readonly { (key_pair.private_key) }
        button type="button" onclick="copyToClipboard('private_key')" { "Copy Private Key" }
        script { (PreEscaped(COPY_SCRIPT)) }
    };
    render_layout(APP_TITLE, content)
}

pub fn error_page(code: u16, message: &str) -> Markup {
    let content = html! {
        h2 class="error" { (code) " " (message) }
        p { a href="/" { "Back to the generator" } }
    };
    render_layout(APP_TITLE, content)
}
