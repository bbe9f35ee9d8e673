// tests/offline_e2e.rs
// Drives the public entry points through reqwest against a local fixture server.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use cdms_scrape::{
    Catalog, CdmsError, ClientOptions, Http, QueryOptions, QueryRequest, get_partition_interpolator,
    get_partition_table, query_lines, species_lines,
};

const FORM: &str = r#"<html><body><form action="/cgi-bin/cdmssearch" method="post">
<select name="Molecules" size="12" multiple>
<option>017506 NH3-wHFS</option>
<option>028503 CO, v=0</option>
<option>029501 HCO+, v=0</option>
</select>
<select name="UnitNu"><option>GHz</option><option>MHz</option></select>
</form></body></html>"#;

const LINK_PAGE: &str = r#"<html><body>
<a href="/cdms/tmp/result_4711.html">Result of your query</a>
<a href="/cdms/">back</a>
</body></html>"#;

const INFO_PAGE: &str = r#"<html><body>
<a href="/cdms/">CDMS</a>
<a href="../cdms/entries/c028503.cat">catalog file</a>
<table>
<tr><th>Parameter</th><th>Value</th></tr>
<tr><td>Q(300.0)</td><td>108.8651</td></tr>
<tr><td>Q(225.0)</td><td>81.7184</td></tr>
<tr><td>Q(150.0)</td><td>54.5798</td></tr>
<tr><td>Q(75.0)</td><td>27.4451</td></tr>
<tr><td>Q(37.5)</td><td>13.8838</td></tr>
<tr><td>Q(18.75)</td><td>7.1036</td></tr>
<tr><td>Q(9.375)</td><td>3.7170</td></tr>
</table></body></html>"#;

// Search-results spacing: starts 0,13,24,35,37,47,50,57,61,72,89
fn results_row(cells: [&str; 11]) -> String {
    format!(
        "{:>13}{:>11}{:>11}{:>2}{:>10}{:>3}{:>7}{:>4}{:>11}{:>17}{}",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7], cells[8], cells[9],
        cells[10]
    )
}

fn results_page() -> String {
    let rows = [
        results_row(["115271.2018", "0.0005", "-5.0105", "3", "0.0000", "3", "-28503", "101", "1", "0", "CO, v=0"]),
        results_row(["230538.0000", "0.0005", "-4.1197", "3", "3.8450", "5", "-28503", "101", "2", "1", "CO, v=0"]),
    ];
    format!("<html><body><pre>\n{}\n</pre></body></html>", rows.join("\n"))
}

// Native catalog spacing: starts 0,13,21,29,31,41,44,51,55,67,79
const CATALOG_FILE: &str = concat!(
    "  115271.2018  0.0005 -5.0105 3    0.0000  3 -28503 101 1           0\n",
    "  230538.0000  0.0005 -4.1197 3    3.8450  5 -28503 101 2           1\n",
    "  345795.9899  0.0005 -3.6118 3   11.5350  7 -28503 101 3           2\n",
);

struct Fixture {
    base_url: String,
    posts: Arc<Mutex<Vec<String>>>,
    targets: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    fn hits(&self, target: &str) -> usize {
        self.targets.lock().unwrap().iter().filter(|t| *t == target).count()
    }
}

fn serve() -> Fixture {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let posts = Arc::new(Mutex::new(Vec::new()));
    let targets = Arc::new(Mutex::new(Vec::new()));

    let routes: HashMap<String, String> = [
        ("GET /cgi-bin/cdmssearch", FORM.to_string()),
        ("POST /cgi-bin/cdmssearch", LINK_PAGE.to_string()),
        ("GET /cdms/tmp/result_4711.html", results_page()),
        ("GET /cgi-bin/cdmsinfo?file=e028503.cat", INFO_PAGE.to_string()),
        ("GET /cdms/entries/c028503.cat", CATALOG_FILE.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let (seen, requested) = (Arc::clone(&posts), Arc::clone(&targets));
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            handle(stream, &routes, &seen, &requested);
        }
    });
    Fixture { base_url, posts, targets }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, String>,
    posts: &Mutex<Vec<String>>,
    targets: &Mutex<Vec<String>>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).unwrap();
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap();
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();
    if method == "POST" {
        posts.lock().unwrap().push(String::from_utf8(body).unwrap());
    }

    targets.lock().unwrap().push(target.clone());

    let (status, page) = match routes.get(&format!("{method} {target}")) {
        Some(page) => ("200 OK", page.as_str()),
        None if target.starts_with("/busy") => ("503 Service Unavailable", "busy"),
        None => ("404 Not Found", "not found"),
    };
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{page}",
        page.len()
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();
}

fn client(base_url: &str) -> Http {
    Http::new(ClientOptions {
        base_url: base_url.to_string(),
        use_system_proxy: false,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn catalog_query_and_results() {
    let fx = serve();
    let http = client(&fx.base_url);

    let catalog = Catalog::load(&http).unwrap();
    assert_eq!(catalog.len(), 3);
    let co = catalog.resolve("CO, v=0", 0.8).unwrap();
    assert_eq!(co.id, "028503");

    let request = QueryRequest::new(100.0, 250.0).molecule(co);
    let table = query_lines(&http, &request, &QueryOptions::default()).unwrap();
    assert_eq!(table.len(), 2);
    assert!((table.lines[0].freq_rest - 115.271_201_8).abs() < 1e-9);
    assert_eq!(table.lines[1].gup, 5);
    assert_eq!(table.lines[1].species, "CO, v=0");
    assert!(table.source_url.as_deref().unwrap().ends_with("/cdms/tmp/result_4711.html"));

    let posts = fx.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].starts_with("MinNu=100&MaxNu=250&UnitNu=GHz&StrLim=-10&Molecules=028503"));
    assert!(posts[0].ends_with("but_action=Submit"));
}

#[test]
fn species_file_via_info_page() {
    let fx = serve();
    let http = client(&fx.base_url);
    let catalog = Catalog::load(&http).unwrap();
    let co = catalog.by_id("028503").unwrap();

    let table = species_lines(&http, co).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.lines[2].qnum1, "3");
    assert!(table.lines.iter().all(|l| l.eup > l.elow));
    assert!(table.source_url.as_deref().unwrap().ends_with("/cdms/entries/c028503.cat"));
}

#[test]
fn partition_table_and_interpolator() {
    let fx = serve();
    let http = client(&fx.base_url);
    let co = Catalog::load(&http).unwrap().by_id("028503").cloned().unwrap();

    let table = get_partition_table(&http, &co).unwrap();
    assert_eq!(table.len(), 7);
    assert_eq!(table.points[0].temperature, 9.375);
    assert_eq!(table.species, "CO, v=0");

    let q = get_partition_interpolator(&http, &co, 2).unwrap();
    for p in &table.points {
        assert!((q.value_at(p.temperature) - p.value).abs() < 1e-9, "T = {}", p.temperature);
    }
    let q100 = q.value_at(100.0);
    assert!(q100 > 27.4451 && q100 < 54.5798);
}

#[test]
fn missing_page_is_a_network_error() {
    let fx = serve();
    let http = client(&format!("{}/mirror", fx.base_url));
    let err = Catalog::load(&http).unwrap_err();
    assert!(matches!(err, CdmsError::Network(_)));
    assert!(!err.is_retryable());
}

#[test]
fn client_errors_are_sent_once() {
    let fx = serve();
    let http = Http::new(ClientOptions {
        base_url: fx.base_url.clone(),
        use_system_proxy: false,
        retries: 2,
        retry_pause: Duration::from_millis(1),
        ..Default::default()
    })
    .unwrap();

    let err = http.get(&format!("{}/cdms/gone.html", fx.base_url)).unwrap_err();
    assert!(matches!(err, CdmsError::Network(_)));
    assert!(!err.is_retryable());
    assert_eq!(fx.hits("/cdms/gone.html"), 1);

    let err = http.get(&format!("{}/busy", fx.base_url)).unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(fx.hits("/busy"), 3);
}
