//! Standalone HTML rendering of Plotly figures

use crate::figure::Figure;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// After a legend click, show the colorbar only when exactly one
/// trace remains visible.
pub const COLORBAR_TOGGLE_SCRIPT: &str = r#"
    <script>
    document.addEventListener('DOMContentLoaded', function(){

        let legendClicked = false;

        function updateColorbar(plot) {
            setTimeout(function(){
                let visibleCount = 0;
                let visibleIndex = -1;
                // check visible state of each trace
                for (let i = 0; i < plot.data.length; i++) {
                    if (plot.data[i].visible !== 'legendonly' && plot.data[i].visible !== false) {
                        visibleCount++;
                        visibleIndex = i;
                    }
                }

                let newShowscale = plot.data.map(function() { return false; });
                if (visibleCount === 1) {
                    newShowscale[visibleIndex] = true;
                }
                let traces = plot.data.map(function(_, i) { return i; });
                Plotly.restyle(plot, {'marker.showscale': newShowscale}, traces);

            }, 100);
        }

        var plots = document.getElementsByClassName('js-plotly-plot');

        Array.from(plots).forEach(function(plot) {

            plot.on('plotly_legendclick', function() {
                legendClicked = true;
            });

            plot.on('plotly_afterplot', function() {
                if (legendClicked) {
                    updateColorbar(plot);
                    legendClicked = false;
                }
            });
        });
    });
    </script>

"#;

/// Keep `</script>` inside JSON strings from closing the script tag
fn script_safe_json(figure: &Figure) -> anyhow::Result<(String, String)> {
    let escape = |s: String| s.replace("</", "<\\/");
    let data = escape(serde_json::to_string(&figure.data)?);
    let layout = escape(serde_json::to_string(&figure.layout)?);
    Ok((data, layout))
}

/// `div` id derived from a name, `[A-Za-z0-9_-]` only
pub fn div_id(name: &str) -> String {
    let body: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("phate-{}", body)
}

///
/// HTML fragment of a figure: a `div` loading Plotly from the CDN
/// followed by the plot, without `<html>` or `<body>`
///
/// * `figure` - the figure
/// * `id` - `div` id of the plot
///
pub fn figure_fragment(figure: &Figure, id: &str) -> anyhow::Result<String> {
    let (data, layout) = script_safe_json(figure)?;
    Ok(format!(
        r#"<div>
<script charset="utf-8" src="{cdn}"></script>
<div id="{id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
<script type="text/javascript">
    window.PLOTLYENV=window.PLOTLYENV || {{}};
    if (document.getElementById("{id}")) {{
        Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}});
    }}
</script>
</div>"#,
        cdn = PLOTLY_CDN,
        id = id,
        data = data,
        layout = layout
    ))
}

/// A complete HTML page holding the figure
pub fn figure_page(figure: &Figure, id: &str) -> anyhow::Result<String> {
    Ok(format!(
        "<html>\n<head><meta charset=\"utf-8\" /></head>\n<body>\n{}\n</body>\n</html>\n",
        figure_fragment(figure, id)?
    ))
}
