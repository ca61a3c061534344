use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        cart::{AddToCartRequest, CartDto, CartItemDto, UpdateQuantityRequest},
        categories::{
            CategoryDto, CategoryList, CategoryWithProductsDto, CreateCategoryRequest,
            UpdateCategoryRequest,
        },
        images::{ImageMetaDto, UploadImageRequest},
        orders::{
            CreateOrderRequest, OrderDto, OrderItemDto, OrderLineRequest, OrderList,
            UpdateOrderRequest,
        },
        products::{CreateProductRequest, ProductDto, ProductList, UpdateProductRequest},
        qna::{AnswerDto, CreateAnswerRequest, CreateQuestionRequest, QuestionDto, QuestionList},
        reviews::{CreateReviewRequest, ReviewDto, ReviewList},
        users::{
            ChangePasswordRequest, UpdateProfileRequest, UpdateRoleRequest, UserDto, UserList,
            UserSummaryDto,
        },
        v2::{
            V2AuthResponse, V2CartDto, V2CartItemDto, V2CategoryDto, V2OkDto, V2OrderDto,
            V2OrderItemDto, V2ProductDto, V2ProductPage, V2RefreshRequest, V2RegisterRequest,
            V2RemoveCartRequest, V2ReviewDto, V2ReviewRequest, V2ToggleRequest, V2Tokens,
            V2UpdateCartRequest, V2UserDto, V2UserSummaryDto, V2WishlistItemDto,
        },
        wishlist::{ToggleResultDto, ToggleWishlistRequest, WishlistItemDto, WishlistList},
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, cart, categories, health, orders, params, products, qna, reviews, users, v2,
        wishlist,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_item,
        cart::clear_cart,
        orders::place_order,
        orders::list_orders,
        orders::list_all_orders,
        orders::update_order,
        reviews::list_reviews,
        reviews::create_review,
        reviews::delete_review,
        qna::list_questions,
        qna::create_question,
        qna::create_answer,
        qna::delete_question,
        qna::delete_answer,
        wishlist::list_wishlist,
        wishlist::toggle,
        wishlist::remove,
        users::list_users,
        users::update_profile,
        users::change_password,
        users::update_role,
        users::delete_user,
        v2::auth::login,
        v2::auth::register,
        v2::auth::refresh,
        v2::auth::me,
        v2::auth::change_password,
        v2::catalog::list_products,
        v2::catalog::list_categories,
        v2::cart::get_cart,
        v2::cart::add_to_cart,
        v2::cart::update_cart,
        v2::cart::remove_from_cart,
        v2::cart::clear_cart,
        v2::orders::list_orders,
        v2::orders::place_order,
        v2::reviews::list_reviews,
        v2::reviews::create_review,
        v2::wishlist::list_wishlist,
        v2::wishlist::toggle,
        v2::wishlist::remove,
        v2::users::update_me,
        v2::images::upload_image,
        v2::images::get_image
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserDto,
            UserSummaryDto,
            UserList,
            UpdateProfileRequest,
            ChangePasswordRequest,
            UpdateRoleRequest,
            ProductDto,
            ProductList,
            CreateProductRequest,
            UpdateProductRequest,
            CategoryDto,
            CategoryWithProductsDto,
            CategoryList,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CartItemDto,
            CartDto,
            AddToCartRequest,
            UpdateQuantityRequest,
            OrderItemDto,
            OrderDto,
            OrderList,
            OrderLineRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            ReviewDto,
            ReviewList,
            CreateReviewRequest,
            AnswerDto,
            QuestionDto,
            QuestionList,
            CreateQuestionRequest,
            CreateAnswerRequest,
            WishlistItemDto,
            WishlistList,
            ToggleWishlistRequest,
            ToggleResultDto,
            UploadImageRequest,
            ImageMetaDto,
            params::ProductListQuery,
            params::ProductSort,
            params::UserListQuery,
            params::V2ProductQuery,
            Meta,
            ApiResponse<AuthResponse>,
            ApiResponse<UserDto>,
            ApiResponse<UserList>,
            ApiResponse<ProductDto>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryDto>,
            ApiResponse<CategoryWithProductsDto>,
            ApiResponse<CategoryList>,
            ApiResponse<CartDto>,
            ApiResponse<CartItemDto>,
            ApiResponse<OrderDto>,
            ApiResponse<OrderList>,
            ApiResponse<ReviewDto>,
            ApiResponse<ReviewList>,
            ApiResponse<QuestionDto>,
            ApiResponse<QuestionList>,
            ApiResponse<AnswerDto>,
            ApiResponse<WishlistList>,
            ApiResponse<ToggleResultDto>,
            V2UserDto,
            V2UserSummaryDto,
            V2Tokens,
            V2AuthResponse,
            V2RegisterRequest,
            V2RefreshRequest,
            V2ProductDto,
            V2ProductPage,
            V2CategoryDto,
            V2CartItemDto,
            V2CartDto,
            V2UpdateCartRequest,
            V2RemoveCartRequest,
            V2OrderItemDto,
            V2OrderDto,
            V2ReviewDto,
            V2ReviewRequest,
            V2WishlistItemDto,
            V2ToggleRequest,
            V2OkDto
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Reviews", description = "Review endpoints"),
        (name = "QnA", description = "Question and answer endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Users", description = "User administration endpoints"),
        (name = "Mobile v2", description = "Raw-body endpoints for the mobile clients"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
