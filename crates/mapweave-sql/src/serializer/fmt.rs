use super::Formatter;

macro_rules! fmt {
    ($f:expr, $( $fragments:expr ),* $(,)?) => {{
        $(
            $fragments.to_sql($f);
        )*
    }};
}

pub(crate) trait ToSql {
    fn to_sql(self, f: &mut Formatter<'_>);
}

impl ToSql for &str {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToSql for &String {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

macro_rules! impl_to_sql_for_tuple {
    ( $( $T:ident ),* ) => {
        impl< $( $T: ToSql ),* > ToSql for ( $( $T, )* ) {
            #[allow(non_snake_case)]
            fn to_sql(self, f: &mut Formatter<'_>) {
                let ( $( $T, )* ) = self;
                $( $T.to_sql(f); )*
            }
        }
    };
}

impl_to_sql_for_tuple!(T1, T2);
impl_to_sql_for_tuple!(T1, T2, T3);
impl_to_sql_for_tuple!(T1, T2, T3, T4);
impl_to_sql_for_tuple!(T1, T2, T3, T4, T5);
impl_to_sql_for_tuple!(T1, T2, T3, T4, T5, T6);
