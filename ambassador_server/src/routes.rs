//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a separate module.
//!
//! Every handler is async and all database and gateway work is awaited, so a slow request never blocks its worker
//! thread.
use actix_web::{get, web, HttpResponse, Responder};
use ambassador_engine::{
    order_objects::NewOrderRequest,
    traits::{AmbassadorDatabase, CheckoutGateway, RankingStore},
    OrderFlowApi,
    RankingsApi,
};
use log::*;

use crate::{
    data_objects::{ConfirmOrderRequest, JsonResponse, OrderSummary, RankingsQuery},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(orders => Get "/orders" impl AmbassadorDatabase, CheckoutGateway);
/// Lists every order with its line items, the customer's full name (`name`) and the order total (`total`, in cents).
pub async fn orders<B, G>(api: web::Data<OrderFlowApi<B, G>>) -> Result<HttpResponse, ServerError>
where
    B: AmbassadorDatabase,
    G: CheckoutGateway,
{
    trace!("💻️ GET orders");
    let orders = api.fetch_orders().await.map_err(|e| {
        debug!("💻️ Could not fetch orders. {e}");
        ServerError::from(e)
    })?;
    let summaries = orders.into_iter().map(OrderSummary::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(summaries))
}

route!(create_order => Post "/orders" impl AmbassadorDatabase, CheckoutGateway);
/// Creates an order through a referral link and opens its checkout session.
///
/// The response is the checkout session, `{"id": ..., "url": ...}`. The storefront redirects the customer to `url`.
/// If anything fails, including the call to the payment provider, no order is stored.
pub async fn create_order<B, G>(
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: AmbassadorDatabase,
    G: CheckoutGateway,
{
    let request = body.into_inner();
    debug!("💻️ POST new order via link '{}' for {} products", request.code, request.products.len());
    let created = api.create_order(request).await.map_err(|e| {
        info!("💻️ Order could not be created. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(created.session))
}

route!(confirm_order => Post "/orders/confirm" impl AmbassadorDatabase, CheckoutGateway);
/// Confirms payment for an order. Settlement happens in the background; the response does not wait for it.
///
/// Confirming an already-completed order succeeds without doing anything.
pub async fn confirm_order<B, G>(
    body: web::Json<ConfirmOrderRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: AmbassadorDatabase,
    G: CheckoutGateway,
{
    let ConfirmOrderRequest { source } = body.into_inner();
    debug!("💻️ POST confirm order for payment reference {source}");
    let result = api.complete_order(&source).await.map_err(|e| {
        info!("💻️ Could not confirm payment {source}. {e}");
        ServerError::from(e)
    })?;
    let order = result.order();
    trace!("💻️ Order #{} is {}. First confirmation: {}", order.id, order.status(), result.is_first_completion());
    Ok(HttpResponse::Ok().json(JsonResponse::success()))
}

//----------------------------------------------   Rankings  ----------------------------------------------------
route!(rankings => Get "/rankings" impl RankingStore);
pub async fn rankings<R: RankingStore>(
    query: web::Query<RankingsQuery>,
    api: web::Data<RankingsApi<R>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET rankings");
    let board = api.leaderboard(query.limit).await?;
    Ok(HttpResponse::Ok().json(board))
}
