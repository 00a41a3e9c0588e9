mod crud_test;
