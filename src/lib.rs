//! itunes_lookup - Typed client for the iTunes Store lookup endpoint
//!
//! This library resolves the metadata of a single catalog entry by its
//! numeric id: it builds the lookup query, performs one HTTP GET and decodes
//! the JSON answer into [`LookupResponse`].
//!
//! # Examples
//!
//! ```no_run
//! use itunes_lookup::{Context, ItunesClient, LookupClient, ResultError, with_country};
//! use std::time::Duration;
//!
//! let client = ItunesClient::new();
//! let ctx = Context::with_timeout(Duration::from_secs(10));
//!
//! let response = client.lookup(&ctx, 1068204657, &[with_country("by")]).unwrap();
//!
//! match response.single_result() {
//!     Ok(app) => println!("{} {}", app.track_name, app.version),
//!     Err(ResultError::NoResults) => println!("Not found"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

mod lookup;
mod response;

pub use lookup::{
    Context, HttpRequest, HttpResponse, HttpTransport, ItunesClient, LookupClient, LookupError,
    LookupOption, LookupParams, ReqwestTransport, TransportError, with_country, with_id,
    with_media,
};
pub use response::{LookupResponse, LookupResult, ResponseError, ResultError};
