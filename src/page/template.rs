//! Fixed markup of the STOPS project page
//!
//! Everything except the fetched title fragment and the appended file is
//! produced here. The markup is kept byte for byte as the project published
//! it, odd whitespace included.

/// Shared R-Forge theme assets, independent of the requesting host
pub const THEME_ROOT: &str = "r-forge.r-project.org/themes/rforge/";

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Declaration, head and logo banner: everything before the fragment
pub fn render_head(group_name: &str) -> String {
    format!(
        r#"{XML_DECLARATION}
<!DOCTYPE html
	PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
	"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en   ">

  <head>
	<meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
	<title>{group_name}</title>
	<link href="http://{THEME_ROOT}styles/estilo1.css" rel="stylesheet" type="text/css" />
  </head>

<body>

<!-- R-Forge Logo -->
<table border="0" width="100%" cellspacing="0" cellpadding="0">
<tr><td>
<a href="http://r-forge.r-project.org/"><img src="http://{THEME_ROOT}/imagesrf/logo.png" border="0" alt="R-Forge Logo" /> </a> </td> </tr>
</table>


<!-- get project title  -->
<!-- own website starts here, the following may be changed as you like -->

"#
    )
}

/// Project description, talks, software and people, up to `</html>`
pub fn render_content(domain: &str, group_name: &str) -> String {
    format!(
        r#"
<!-- end of project description -->

<p> This is the homepage of the <b>Structure Optimized Proximity Scaling (STOPS)</b> project. On this page you can find links to papers, talks, data and software related to STOPS. One can also find a tutorial for COPS and STOPS and the MDS functions below.</p>

<h3>Papers:</h3>
<p><a href="http://epub.wu.ac.at/4888/">Technical Report on Cluster Optimized Proximity Scaling (COPS)</a> </p>

<h3>Talks:</h3>
<table>
<tr>
  <th>Talk</th>
  <th>Date</th>
  <th>Place</th>
</tr> 
<tr>
  <td>Psychoco 2015 (<a href="http://epub.wu.ac.at/4478/">slides</a>)</td>
  <td>12.02.2015-13.02.2015</td>
  <td>Amsterdam, The Netherlands</td>
</tr> 
<tr>
  <td>CFE-ERCIM 2014 (<a href="http://epub.wu.ac.at/4477/">slides</a>)</td>
  <td>06.12.2014-08.12.2014</td>
  <td>Pisa, Italy</td>
</tr> 
</table>

<h3>Software:</h3>
<p> The <strong>project summary page</strong> you can find <a href="http://{domain}/projects/{group_name}/"><strong>here</strong></a>. </p>

The most recent build is available for Windows and Linux here: <a href="https://r-forge.r-project.org/R/?group_id=2037">STOPS Package</a>


<!--- <p>Until the current issues with R-Forge are fixed however you can get the package here too:</p> 
<dl>
<li><a href="stops_current.tar.gz">STOPS Package Source</a>
</dl>
---!>

<h3>People:</h3>
<dl>
<li><a href="http://www.wu.ac.at/methods/team/dr-thomas-rusch/en/">Thomas Rusch</a></li> 
<li><a href="http://scholar.harvard.edu/mair/home">Patrick Mair</a></li>
<li><a href="http://www.wu.ac.at/statmath/en/faculty_staff/faculty/khornik">Kurt Hornik</a></li> 
<li><a href="http://gifi.stat.ucla.edu/">Jan de Leeuw</a></li>
</dl>
</body>
</html>


"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_starts_with_declaration_then_doctype() {
        let head = render_head("stops");
        let mut lines = head.lines();
        assert_eq!(lines.next(), Some(XML_DECLARATION));
        assert_eq!(lines.next(), Some("<!DOCTYPE html"));
    }

    #[test]
    fn test_head_title_and_theme_links() {
        let head = render_head("stops");
        assert!(head.contains("<title>stops</title>"));
        assert!(head.contains(
            r#"<link href="http://r-forge.r-project.org/themes/rforge/styles/estilo1.css""#
        ));
        assert!(head.contains("http://r-forge.r-project.org/themes/rforge//imagesrf/logo.png"));
        assert!(head.ends_with("<!-- own website starts here, the following may be changed as you like -->\n\n"));
    }

    #[test]
    fn test_content_links_use_host_parts() {
        let content = render_content("r-forge.r-project.org", "stops");
        assert!(content.starts_with("\n<!-- end of project description -->"));
        assert!(content.contains(r#"<a href="http://r-forge.r-project.org/projects/stops/">"#));
        assert!(content.contains("https://r-forge.r-project.org/R/?group_id=2037"));
        assert!(content.ends_with("</body>\n</html>\n\n\n"));
    }

    #[test]
    fn test_content_static_sections() {
        let content = render_content("example.org", "foo");
        assert!(content.contains("<h3>Papers:</h3>"));
        assert!(content.contains("http://epub.wu.ac.at/4888/"));
        assert!(content.contains("<td>Psychoco 2015"));
        assert!(content.contains("<td>Pisa, Italy</td>"));
        for person in ["Thomas Rusch", "Patrick Mair", "Kurt Hornik", "Jan de Leeuw"] {
            assert!(content.contains(person), "missing {person}");
        }
    }
}
