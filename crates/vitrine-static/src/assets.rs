//! Asset pipeline for the shared preview script and stylesheet.

/// Frames never shrink below this height once loaded, in pixels.
pub const MIN_FRAME_HEIGHT: u32 = 256;

/// Drag resizing never narrows a frame below this width, in pixels.
pub const MIN_FRAME_WIDTH: u32 = 376;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the section page stylesheet.
    pub fn generate_css() -> String {
        PREVIEW_CSS.to_string()
    }

    /// Generate the section page script.
    pub fn generate_js() -> String {
        PREVIEW_JS
            .replace("__MIN_FRAME_HEIGHT__", &MIN_FRAME_HEIGHT.to_string())
            .replace("__MIN_FRAME_WIDTH__", &MIN_FRAME_WIDTH.to_string())
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

// Highlight colors over the darkula theme
const PREVIEW_CSS: &str = r#"* {
  box-sizing: border-box;
}

.hljs {
  background: #252f3f;
  color: white;
}

.hljs-tag {
  color: white;
}

.hljs-name {
  color: #ff8383;
}

.hljs-attr {
  color: #ffe484;
  font-style: italic;
}

.hljs-string {
  color: #b5f4a5;
}
"#;

const PREVIEW_JS: &str = r#"// Preview pages: frame sizing, source highlighting, copy and drag resize.
;(function () {
  'use strict'

  var MIN_FRAME_HEIGHT = __MIN_FRAME_HEIGHT__
  var MIN_FRAME_WIDTH = __MIN_FRAME_WIDTH__

  // Browsers disagree on which of these reflects the full document.
  function docHeight(doc) {
    var body = doc.body
    var html = doc.documentElement
    return Math.max(
      body.scrollHeight,
      body.offsetHeight,
      html.clientHeight,
      html.scrollHeight,
      html.offsetHeight
    )
  }

  function byHash(attribute, hash) {
    return document.querySelector('[' + attribute + '="' + CSS.escape(hash) + '"]')
  }

  function sourceFor(hash) {
    var textarea = byHash('data-source-for', hash)
    return textarea ? textarea.value.trim() : ''
  }

  function highlight(hash) {
    var code = byHash('data-code-for', hash)
    if (!code || !window.hljs) return
    hljs.configure({ useBR: false, tabReplace: '  ' })
    code.innerHTML = hljs.highlight('html', sourceFor(hash)).value
  }

  function fitFrame(iframe) {
    var doc = iframe.contentDocument || iframe.contentWindow.document
    doc.body.classList.add('antialiased', 'font-sans', 'bg-white')
    iframe.style.visibility = 'hidden'
    iframe.style.height = '10px'
    iframe.style.height = Math.max(docHeight(doc), MIN_FRAME_HEIGHT) + 'px'
    iframe.style.visibility = 'visible'
  }

  // Alpine component backing each preview pane
  window.resizableIFrame = function () {
    return {
      resizing: false,
      width: '100%',
      init: function () {}
    }
  }

  document.querySelectorAll('iframe[data-id]').forEach(function (iframe) {
    iframe.addEventListener('load', function () {
      fitFrame(iframe)
      highlight(iframe.dataset.id)
    })
  })

  document.querySelectorAll('[data-copy-source]').forEach(function (button) {
    button.addEventListener('click', function () {
      if (navigator.clipboard) {
        navigator.clipboard.writeText(sourceFor(button.dataset.copySource))
      }
    })
  })

  document.querySelectorAll('[data-resize-handle]').forEach(function (handle) {
    handle.addEventListener('mousedown', startDrag)
  })

  function startDrag(event) {
    var handle = event.currentTarget
    var iframe = handle.parentElement.querySelector('iframe')
    var startX = event.screenX
    var targets = [document, iframe.contentWindow]

    function move(e) {
      e.stopPropagation()
      resize(handle, iframe, e.screenX - startX)
    }

    function stop() {
      targets.forEach(function (target) {
        target.removeEventListener('mousemove', move)
        target.removeEventListener('mouseup', stop)
      })
    }

    targets.forEach(function (target) {
      target.addEventListener('mousemove', move)
      target.addEventListener('mouseup', stop)
    })
  }

  function resize(handle, iframe, dx) {
    var maxWidth = handle.parentElement.offsetWidth - handle.offsetWidth
    var width = Math.max(MIN_FRAME_WIDTH, Math.min(maxWidth + dx, maxWidth))
    iframe.style.width = width + 'px'
    handle.style.left = width + 'px'
  }
})()
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains("box-sizing: border-box"));
        assert!(css.contains(".hljs-attr"));
    }

    #[test]
    fn generates_js_with_bounds() {
        let js = AssetPipeline::generate_js();

        assert!(js.contains("var MIN_FRAME_HEIGHT = 256"));
        assert!(js.contains("var MIN_FRAME_WIDTH = 376"));
        assert!(!js.contains("__MIN_"));
        assert!(js.contains("window.resizableIFrame"));
        assert!(js.contains("removeEventListener('mouseup', stop)"));
    }

    #[test]
    fn measures_every_height_source() {
        let js = AssetPipeline::generate_js();

        for measure in [
            "body.scrollHeight",
            "body.offsetHeight",
            "html.clientHeight",
            "html.scrollHeight",
            "html.offsetHeight",
        ] {
            assert!(js.contains(measure), "missing {}", measure);
        }
    }

    #[test]
    fn minifies_css() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".hljs-name"));
    }
}
